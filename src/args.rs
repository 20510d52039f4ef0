use clap::Parser;

/// This is the analytics reporter for the model-portfolio dashboard.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path) The directory holding the three dashboard tables:
    /// people.csv, companies.csv and model_portfolios.csv. A missing file is
    /// treated as an empty table.
    #[clap(short, long, value_parser, default_value = "data")]
    pub data_dir: String,

    /// (file path) Overrides the location of the people table.
    #[clap(long, value_parser)]
    pub people: Option<String>,

    /// (file path) Overrides the location of the companies table.
    #[clap(long, value_parser)]
    pub companies: Option<String>,

    /// (file path) Overrides the location of the model-portfolios table.
    #[clap(long, value_parser)]
    pub portfolios: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the analytics summary will be written in
    /// JSON format to the given location instead of the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a previously exported summary in JSON format.
    /// If provided, ppulse will check that the freshly computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
