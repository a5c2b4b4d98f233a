use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "empathy-etl")]
#[command(about = "Convert survey responses into empathy interview format")]
pub struct CliConfig {
    /// Survey file (.xlsx, .xls, .csv, .tsv) [default: SurveyResponse.xlsx]
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file (.xlsx, .csv, .tsv) [default: Empathy_Interview_Data.xlsx]
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML config with column mapping and interview defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the converted table as JSON instead of writing a file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
