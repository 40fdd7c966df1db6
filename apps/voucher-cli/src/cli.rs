//! Command line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use voucher_core::validation::parse_expiry_date;
use voucher_core::VoucherRequest;

#[derive(Debug, Parser)]
#[command(name = "voucher", version, about = "Voucher catalog administration")]
pub struct Cli {
    /// SQLite database file (overrides VOUCHER_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a voucher
    Create(VoucherArgs),

    /// List vouchers, one page at a time
    List(ListArgs),

    /// Show one voucher
    Get {
        /// Voucher id
        id: String,
    },

    /// Replace code, discount and expiry of a voucher
    Update {
        /// Voucher id
        id: String,

        #[command(flatten)]
        fields: VoucherArgs,
    },

    /// Delete a voucher
    Delete {
        /// Voucher id
        id: String,
    },

    /// Import vouchers from a CSV file
    Import {
        /// CSV file with voucher_code,discount_percent,expiry_date rows
        file: PathBuf,
    },

    /// Export every voucher as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct VoucherArgs {
    /// Voucher code (unique, ignoring case)
    #[arg(long)]
    pub code: String,

    /// Discount in percent (1-100)
    #[arg(long, allow_negative_numbers = true)]
    pub discount: i32,

    /// Last valid day, YYYY-MM-DD
    #[arg(long, value_parser = expiry_arg)]
    pub expiry: NaiveDate,
}

impl From<VoucherArgs> for VoucherRequest {
    fn from(args: VoucherArgs) -> Self {
        VoucherRequest {
            code: args.code,
            discount_percent: args.discount,
            expiry_date: Some(args.expiry),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Page number, starting at 1 (default 1)
    #[arg(long)]
    pub page: Option<String>,

    /// Page size (default 10)
    #[arg(long)]
    pub size: Option<String>,

    /// Case-insensitive code fragment
    #[arg(long, default_value = "")]
    pub search: String,

    /// Creation-time order: asc or desc
    #[arg(long, default_value = "asc")]
    pub order: String,
}

fn expiry_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_expiry_date(raw).map_err(|e| e.to_string())
}
