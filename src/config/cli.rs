use crate::config::toml_config::DEFAULT_DATA_FILE;
use crate::core::ConfigProvider;
use crate::domain::model::AdminSeed;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "agri-advisor")]
#[command(about = "Crop advisory tool for farm submissions")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Overrides storage.data_file from the config file
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct FarmerLogin {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Clone, Args)]
pub struct AdminLogin {
    #[arg(long = "admin")]
    pub username: String,

    #[arg(long = "admin-password")]
    pub password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Crop suggestions for a soil / water level / crop combination
    Recommend {
        #[arg(long)]
        soil: String,
        #[arg(long)]
        water: String,
        #[arg(long)]
        crop: String,
        #[arg(long)]
        json: bool,
    },
    /// List known soil types, water levels and crops with guides
    Catalog,
    RegisterFarmer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        password: String,
    },
    RegisterAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Record farm data and print the resulting advice
    Submit {
        #[command(flatten)]
        farmer: FarmerLogin,
        #[arg(long)]
        soil: String,
        #[arg(long)]
        water: String,
        #[arg(long)]
        crop: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Advice for the farmer's latest submission
    Suggestion {
        #[command(flatten)]
        farmer: FarmerLogin,
        #[arg(long)]
        json: bool,
    },
    Feedback {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        text: String,
    },
    Dashboard {
        #[command(flatten)]
        admin: AdminLogin,
    },
    Farmers {
        #[command(flatten)]
        admin: AdminLogin,
    },
    FeedbackList {
        #[command(flatten)]
        admin: AdminLogin,
    },
    /// Attach a recommendation to a submission
    RecommendTo {
        #[command(flatten)]
        admin: AdminLogin,
        #[arg(long)]
        id: u64,
        #[arg(long)]
        text: String,
    },
    DeleteSubmission {
        #[command(flatten)]
        admin: AdminLogin,
        #[arg(long)]
        id: u64,
    },
    DeleteFarmer {
        #[command(flatten)]
        admin: AdminLogin,
        #[arg(long)]
        id: u64,
    },
    ResetIds {
        #[command(flatten)]
        admin: AdminLogin,
    },
    Report {
        #[command(flatten)]
        admin: AdminLogin,
        /// Also write CSV files into this directory
        #[arg(long)]
        csv_dir: Option<String>,
    },
}

impl CliConfig {
    /// Whether the command needs the record store at all.
    pub fn needs_store(&self) -> bool {
        !matches!(self.command, Command::Recommend { .. } | Command::Catalog)
    }
}

impl ConfigProvider for CliConfig {
    fn data_file(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    fn seed_admins(&self) -> &[AdminSeed] {
        &[]
    }

    fn report_dir(&self) -> Option<&str> {
        None
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", self.data_file())
    }
}
