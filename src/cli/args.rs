use clap::Parser;
use std::path::PathBuf;

/// Process banking front-end transactions from standard input
#[derive(Parser, Debug)]
#[command(name = "teller-engine")]
#[command(about = "Process banking front-end transactions from standard input", long_about = None)]
pub struct CliArgs {
    /// Current-accounts file loaded into the ledger at startup
    #[arg(value_name = "ACCOUNTS_FILE", help = "Path to the current accounts file")]
    pub accounts_file: PathBuf,

    /// Sink the daily transaction log is written to at logout
    #[arg(value_name = "TRANSACTION_LOG", help = "Path the transaction log is written to")]
    pub transaction_log: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_both_paths_parse() {
        let parsed =
            CliArgs::try_parse_from(["program", "accounts.txt", "transactions.txt"]).unwrap();
        assert_eq!(parsed.accounts_file, PathBuf::from("accounts.txt"));
        assert_eq!(parsed.transaction_log, PathBuf::from("transactions.txt"));
    }

    #[rstest]
    #[case::no_args(&["program"])]
    #[case::one_arg(&["program", "accounts.txt"])]
    #[case::too_many(&["program", "a", "b", "c"])]
    fn test_invalid_invocations(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
