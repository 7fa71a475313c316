use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::query::{InstanceFilter, PriceQuery};
use crate::types::ServiceCode;

#[derive(Parser, Debug)]
#[command(
    name = "apf",
    version,
    about = "CLI tool to get AWS pricing information"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// MongoDB connection string [default: mongodb://localhost:27017]
    #[arg(long, short = 'm', global = true, env = "MONGODB_URI")]
    pub mongo_uri: Option<String>,

    /// Output format: table (default), json
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch AWS Price List data into MongoDB
    #[command(visible_alias = "f")]
    Fetch(FetchArgs),
    /// Look up stored on-demand prices
    #[command(visible_alias = "p")]
    Price {
        #[command(flatten)]
        instance: InstanceArgs,
        #[command(subcommand)]
        service: PriceCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// AWS profile [default: default]
    #[arg(long, short = 'p', env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Region of the Price List API endpoint [default: us-east-1]
    #[arg(long, short = 'r', env = "AWS_REGION")]
    pub region: Option<String>,

    /// Region whose prices are fetched [default: ap-northeast-1]
    #[arg(long)]
    pub price_region: Option<String>,

    /// Service codes to fetch (AmazonEC2, AmazonRDS, AmazonElastiCache or
    /// ec2, rds, elasticache). Defaults to all of them.
    #[arg(long = "service", short = 's', value_delimiter = ',')]
    pub services: Vec<ServiceCode>,

    /// Give up on the whole fetch after this many seconds [default: 1800]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Service codes fetched at the same time [default: 10]
    #[arg(long)]
    pub max_in_flight: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InstanceArgs {
    /// Instance type, e.g. t3.micro, db.r6g.large, cache.m5.large
    #[arg(long, short = 'i', global = true)]
    pub instance_type: Option<String>,

    /// vCPU count
    #[arg(long, visible_alias = "cpu", global = true)]
    pub vcpu: Option<String>,

    /// Memory in GiB
    #[arg(long, visible_alias = "mem", global = true)]
    pub memory: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PriceCommand {
    /// Get EC2 pricing
    Ec2 {
        /// OS (e.g. Linux, RHEL, SUSE, Windows, ...)
        #[arg(long, short = 'o', default_value = "Linux")]
        os: String,
        /// Tenancy (e.g. Shared, Dedicated, Host, Reserved, NA)
        #[arg(long, short = 't', default_value = "Shared")]
        tenancy: String,
        /// Capacity status (e.g. Used, UnusedCapacityReservation, AllocatedCapacityReservation)
        #[arg(long, short = 'c', default_value = "Used")]
        capacitystatus: String,
        /// Pre-installed software (e.g. NA, SQL Web, SQL Std, ...)
        #[arg(long, short = 'p', default_value = "NA")]
        preinstalled_sw: String,
    },
    /// Get RDS pricing
    Rds {
        /// Database engine (e.g. Aurora MySQL, MySQL, Aurora PostgreSQL, PostgreSQL, MariaDB, Oracle, SQL Server)
        #[arg(long, short = 'e', default_value = "Aurora MySQL")]
        engine: String,
        /// Deployment option (e.g. Single-AZ, Multi-AZ)
        #[arg(long, short = 'd', default_value = "Single-AZ")]
        deployment_option: String,
    },
    /// Get ElastiCache pricing
    #[command(visible_alias = "ec")]
    Elasticache {
        /// Cache engine (e.g. Redis, Memcached, Valkey)
        #[arg(long, short = 'e', default_value = "Redis")]
        engine: String,
    },
}

#[derive(ValueEnum, Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl FetchArgs {
    pub fn services(&self) -> Vec<ServiceCode> {
        if self.services.is_empty() {
            return ServiceCode::ALL.to_vec();
        }
        let mut services = self.services.clone();
        services.sort();
        services.dedup();
        services
    }
}

impl PriceCommand {
    pub fn into_query(self, instance: InstanceArgs) -> PriceQuery {
        let instance = InstanceFilter {
            instance_type: instance.instance_type,
            vcpu: instance.vcpu,
            memory: instance.memory,
        };
        match self {
            PriceCommand::Ec2 {
                os,
                tenancy,
                capacitystatus,
                preinstalled_sw,
            } => PriceQuery::Compute {
                instance,
                os,
                tenancy,
                capacity_status: capacitystatus,
                pre_installed_sw: preinstalled_sw,
            },
            PriceCommand::Rds {
                engine,
                deployment_option,
            } => PriceQuery::Database {
                instance,
                engine,
                deployment_option,
            },
            PriceCommand::Elasticache { engine } => PriceQuery::Cache { instance, engine },
        }
    }
}
