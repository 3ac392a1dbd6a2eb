use clap::{Subcommand, ValueEnum};
use planner::query::{Dialect, MySql, Postgres};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a saved filter and print its condition and SQL
    Compile {
        #[arg(long, help = "Filter file path (JSON)")]
        filter: String,

        #[arg(long, value_enum, default_value_t = DialectKind::Postgres)]
        dialect: DialectKind,

        #[arg(
            long,
            help = "Print the predicate grouping only, without resolving the model"
        )]
        symbolic: bool,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Validate every term and the parenthesis structure of a filter
    Check {
        #[arg(long, help = "Filter file path (JSON)")]
        filter: String,

        #[arg(long, help = "Print the issues as JSON")]
        json: bool,
    },
    /// Run a filter over a JSON array of records
    Apply {
        #[arg(long, help = "Filter file path (JSON)")]
        filter: String,

        #[arg(long, help = "Records file path (JSON array)")]
        records: String,

        #[arg(
            long,
            help = "If specified, writes the matching records to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// List the field choices a registered model offers
    Fields {
        #[arg(long, help = "Qualified model name, e.g. shop.Order")]
        model: String,
    },
    /// List the models registered for dynamic filtering
    Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectKind {
    Postgres,
    Mysql,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::Mysql => &MySql,
        }
    }
}
