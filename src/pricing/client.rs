use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_pricing::types::{Filter, FilterType};
use tracing::debug;

use crate::error::FetchError;
use crate::types::ServiceCode;

/// Only real regions; edge locations and Outposts are excluded.
const REGION_LOCATION_TYPE: &str = "AWS Region";

/// Field filters applied to every `GetProducts` call.
#[derive(Debug, Clone)]
pub struct ProductFilters {
    /// `regionCode` the products must be priced in, e.g. `ap-northeast-1`.
    pub region_code: String,
}

impl ProductFilters {
    pub fn new(region_code: impl Into<String>) -> Self {
        Self {
            region_code: region_code.into(),
        }
    }

    fn term_matches(&self) -> [(&'static str, &str); 2] {
        [
            ("regionCode", self.region_code.as_str()),
            ("locationType", REGION_LOCATION_TYPE),
        ]
    }
}

/// Hands out raw Price List pages for one service code, one at a time.
#[async_trait]
pub trait PageCursor: Send {
    /// Next page of JSON-encoded entries, or `None` once exhausted.
    async fn next_page(&mut self) -> Result<Option<Vec<String>>, FetchError>;
}

/// Anything that can page through the Price List for a service code.
pub trait PriceListSource: Send + Sync {
    fn pages(&self, service: ServiceCode, filters: &ProductFilters) -> Box<dyn PageCursor>;
}

/// Price List API client backed by the standard AWS credential chain.
#[derive(Clone)]
pub struct AwsPriceList {
    client: aws_sdk_pricing::Client,
}

impl AwsPriceList {
    /// `region` is where the Price List endpoint lives (us-east-1,
    /// eu-central-1 or ap-south-1), not the region being priced.
    pub async fn connect(profile: Option<&str>, region: &str) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        Self {
            client: aws_sdk_pricing::Client::new(&config),
        }
    }
}

impl PriceListSource for AwsPriceList {
    fn pages(&self, service: ServiceCode, filters: &ProductFilters) -> Box<dyn PageCursor> {
        Box::new(AwsPages {
            client: self.client.clone(),
            service,
            filters: filters.clone(),
            next_token: None,
            done: false,
            page: 0,
        })
    }
}

struct AwsPages {
    client: aws_sdk_pricing::Client,
    service: ServiceCode,
    filters: ProductFilters,
    next_token: Option<String>,
    done: bool,
    page: usize,
}

impl AwsPages {
    fn build_filters(&self) -> Result<Vec<Filter>, FetchError> {
        self.filters
            .term_matches()
            .into_iter()
            .map(|(field, value)| {
                Filter::builder()
                    .r#type(FilterType::TermMatch)
                    .field(field)
                    .value(value)
                    .build()
                    .map_err(|e| FetchError::Request(Box::new(e)))
            })
            .collect()
    }
}

#[async_trait]
impl PageCursor for AwsPages {
    async fn next_page(&mut self) -> Result<Option<Vec<String>>, FetchError> {
        if self.done {
            return Ok(None);
        }

        let output = self
            .client
            .get_products()
            .service_code(self.service.as_str())
            .set_filters(Some(self.build_filters()?))
            .set_next_token(self.next_token.take())
            .send()
            .await
            .map_err(|e| FetchError::Api(Box::new(e)))?;

        self.page += 1;
        self.next_token = output.next_token().map(str::to_string);
        self.done = self.next_token.is_none();

        let entries = output.price_list().to_vec();
        debug!(service = %self.service, page = self.page, entries = entries.len(), "fetched page");
        Ok(Some(entries))
    }
}
