// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::Result;
use crate::{PrintOptions, ProcessOptions};
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct Cli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"));

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        let result = match matches.subcommand() {
            Some(("process", sub_matches)) => handlers::handle_process_command(self, sub_matches),
            Some(("info", sub_matches)) => handlers::handle_info_command(self, sub_matches),
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        };

        log::debug!("Finished in {}ms", self.start_time.elapsed().as_millis());
        result
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.json or .toml)")
                    .global(true)
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .global(true)
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("process")
                    .about("Add and remove vendor prefixes")
                    .arg(Arg::new("input").help("Input CSS file, directory, or - for stdin").default_value("-").index(1))
                    .arg(Arg::new("output").short('o').long("output").value_name("PATH").help("Output file, or output directory with --recursive"))
                    .arg(browsers_arg())
                    .arg(Arg::new("compact").long("compact").help("Print one line per stylesheet").action(ArgAction::SetTrue))
                    .arg(Arg::new("indent").long("indent").value_name("TEXT").help("Indentation for readable output"))
                    .arg(Arg::new("no-comments").long("no-comments").help("Drop comments from the output").action(ArgAction::SetTrue))
                    .arg(Arg::new("debug").short('d').long("debug").help("Log every processing phase").action(ArgAction::SetTrue))
                    .arg(Arg::new("stats").long("stats").help("Show how many declarations changed").action(ArgAction::SetTrue))
                    .arg(Arg::new("recursive").short('r').long("recursive").help("Process every CSS file in a directory").action(ArgAction::SetTrue))
                    .arg(Arg::new("watch").short('w').long("watch").help("Watch the input and reprocess on change").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("info")
                    .about("Show selected browsers and the prefixes they need")
                    .arg(browsers_arg())
                    .arg(Arg::new("format").short('f').long("format").value_parser(clap::value_parser!(OutputFormat)).default_value("text").help("Report format")),
            )
            .subcommand(
                Command::new("check")
                    .about("Report CSS files that are missing prefixes or carry outdated ones")
                    .arg(Arg::new("input").help("Input CSS file or directory").required(true).index(1))
                    .arg(browsers_arg())
                    .arg(Arg::new("recursive").short('r').long("recursive").help("Check all CSS files in directory recursively").action(ArgAction::SetTrue)),
            )
    }

    fn setup_logging(&self, verbose_count: u8) {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
    }

    /// Browser requirements from `--browsers`, else the config file, else defaults
    pub fn requirements(&self, matches: &clap::ArgMatches) -> Vec<String> {
        if let Some(browsers) = matches.get_one::<String>("browsers") {
            return split_requirements(browsers);
        }
        self.config.browsers.clone().unwrap_or_default()
    }

    pub fn build_process_options(&self, matches: &clap::ArgMatches) -> ProcessOptions {
        let compact = matches.get_flag("compact") || self.config.compact.unwrap_or(false);
        let keep_comments =
            !matches.get_flag("no-comments") && self.config.keep_comments.unwrap_or(!compact);

        let print = if compact {
            PrintOptions::compact()
        } else {
            let indent = matches
                .get_one::<String>("indent")
                .or(self.config.indent.as_ref())
                .map(String::as_str)
                .unwrap_or("  ");
            PrintOptions::readable(indent)
        };

        ProcessOptions {
            print: print.with_comments(keep_comments),
            filename: None,
            debug_mode: matches.get_flag("debug"),
        }
    }

    pub fn output_directory(&self) -> Option<&str> {
        self.config.output_directory.as_deref()
    }
}

fn browsers_arg() -> Arg {
    Arg::new("browsers")
        .short('b')
        .long("browsers")
        .value_name("QUERIES")
        .help("Comma separated browser requirements, e.g. \"last 2 versions, ie 10\"")
}

fn split_requirements(browsers: &str) -> Vec<String> {
    browsers
        .split(',')
        .map(str::trim)
        .filter(|requirement| !requirement.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrintStyle;

    fn matches(args: &[&str]) -> clap::ArgMatches {
        let cli = Cli::new();
        let matches = cli.build_cli().try_get_matches_from(args).unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();
        sub_matches.clone()
    }

    #[test]
    fn test_split_requirements() {
        assert_eq!(
            split_requirements("last 2 versions, ie 10,,"),
            vec!["last 2 versions".to_string(), "ie 10".to_string()]
        );
    }

    #[test]
    fn test_flags_override_config() {
        let mut cli = Cli::new();
        cli.config.browsers = Some(vec!["ff 20".to_string()]);
        cli.config.indent = Some("\t".to_string());

        let from_config = matches(&["prefixr", "process", "a.css"]);
        assert_eq!(cli.requirements(&from_config), vec!["ff 20".to_string()]);
        assert_eq!(cli.build_process_options(&from_config).print, PrintOptions::readable("\t"));

        let from_flags = matches(&["prefixr", "process", "a.css", "-b", "chrome 25", "--compact"]);
        assert_eq!(cli.requirements(&from_flags), vec!["chrome 25".to_string()]);
        assert_eq!(cli.build_process_options(&from_flags).print.style, PrintStyle::Compact);
    }

    #[test]
    fn test_comments_kept_by_default() {
        let cli = Cli::new();
        let options = cli.build_process_options(&matches(&["prefixr", "process"]));
        assert!(options.print.keep_comments);
        assert!(!options.debug_mode);

        let options = cli.build_process_options(&matches(&["prefixr", "process", "--no-comments"]));
        assert!(!options.print.keep_comments);
    }
}
