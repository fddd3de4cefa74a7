use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use variant_i18n::{Config, VerbosityLevel};
use variant_i18n_cli::{
    LoadSpec, build_options, build_registry, consistency_report, parse_data_pair, parse_load_spec,
};

fn source_args() -> [Arg; 3] {
    [
        Arg::new("dir")
            .long("dir")
            .short('d')
            .help("Directory with one translation file per language (en.json, es.yaml, ...)")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("load")
            .long("load")
            .short('l')
            .help("Load files for a language: LANG=PATTERN, e.g. es=locales/es/*.yaml")
            .action(ArgAction::Append)
            .value_parser(parse_load_spec),
        Arg::new("fallback")
            .long("fallback")
            .short('f')
            .help("Fallback language (default: en)")
            .default_value("en"),
    ]
}

fn cli() -> Command {
    Command::new("variant-i18n")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate keys and check translation files")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log how translations are resolved")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate one key")
                .arg(
                    Arg::new("key")
                        .help("Translation key")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .help("Target language")
                        .required(true),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('c')
                        .help("Count used to pick a plural variant")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("gender")
                        .long("gender")
                        .short('g')
                        .help("male, female or nonbinary"),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .help("Interpolation value: FIELD=VALUE")
                        .action(ArgAction::Append)
                        .value_parser(parse_data_pair),
                )
                .args(source_args()),
        )
        .subcommand(
            Command::new("check")
                .about("Compare translation keys across languages")
                .arg(
                    Arg::new("languages")
                        .help("Languages to check (default: all)")
                        .action(ArgAction::Append),
                )
                .args(source_args()),
        )
        .subcommand(
            Command::new("languages")
                .about("List the loaded languages")
                .args(source_args()),
        )
}

fn load(matches: &ArgMatches) -> Result<variant_i18n::I18n, Box<dyn std::error::Error>> {
    let verbose = matches.get_flag("verbose");
    let config = Config::default()
        .with_fallback_language(
            matches
                .get_one::<String>("fallback")
                .map(String::as_str)
                .unwrap_or(variant_i18n::DEFAULT_FALLBACK_LANGUAGE),
        )
        .with_verbosity(if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        });
    let dir = matches.get_one::<PathBuf>("dir");
    let loads: Vec<LoadSpec> = matches
        .get_many::<LoadSpec>("load")
        .map(|loads| loads.cloned().collect())
        .unwrap_or_default();

    if dir.is_none() && loads.is_empty() {
        return Err("no translations given, use --dir or --load".into());
    }

    Ok(build_registry(config, dir.map(PathBuf::as_path), &loads)?)
}

/// Filter used when `RUST_LOG` is unset. `--verbose` turns on the library's
/// resolution logs.
fn default_log_directives(verbose: bool) -> &'static str {
    if verbose { "variant_i18n=debug,warn" } else { "warn" }
}

fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directives(verbose)))
}

fn verbose_requested(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub)| sub.get_flag("verbose"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose_requested(&matches)))
        .init();

    match matches.subcommand() {
        Some(("translate", sub)) => {
            let i18n = load(sub)?;
            let key = sub
                .get_one::<String>("key")
                .ok_or("missing translation key")?;
            let lang = sub.get_one::<String>("lang").ok_or("missing language")?;
            let data: Vec<(String, String)> = sub
                .get_many::<(String, String)>("data")
                .map(|pairs| pairs.cloned().collect())
                .unwrap_or_default();
            let options = build_options(
                sub.get_one::<i64>("count").copied(),
                sub.get_one::<String>("gender").map(String::as_str),
                &data,
            );
            println!("{}", i18n.translate(lang, key, &options));
        }
        Some(("check", sub)) => {
            let i18n = load(sub)?;
            let languages: Vec<String> = sub
                .get_many::<String>("languages")
                .map(|names| names.cloned().collect())
                .unwrap_or_default();
            let report = consistency_report(&i18n, &languages);
            if report.is_empty() {
                println!("✅ {} language(s) consistent", i18n.languages().len());
            } else {
                for line in &report {
                    println!("{}", line);
                }
                return Err(format!("{} inconsistencies found", report.len()).into());
            }
        }
        Some(("languages", sub)) => {
            let i18n = load(sub)?;
            for language in i18n.languages() {
                let entries = i18n.entries(language).map_or(0, <[_]>::len);
                println!("{}\t{} entries", language, entries);
            }
        }
        _ => return Err("unknown subcommand".into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_translate_arguments() {
        let matches = cli()
            .try_get_matches_from([
                "variant-i18n",
                "translate",
                "emails",
                "--lang",
                "es",
                "--count",
                "-1",
                "--data",
                "Name=Ada",
                "--load",
                "es=es.json",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "translate");
        assert_eq!(sub.get_one::<i64>("count"), Some(&-1));
        assert_eq!(sub.get_one::<String>("fallback").map(String::as_str), Some("en"));
        let data: Vec<&(String, String)> = sub.get_many("data").unwrap().collect();
        assert_eq!(data, vec![&("Name".to_string(), "Ada".to_string())]);
    }

    #[test]
    fn test_verbose_enables_library_debug_logs() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(
            EnvFilter::new(default_log_directives(false)).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            EnvFilter::new(default_log_directives(true)).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );

        let quiet = cli()
            .try_get_matches_from(["variant-i18n", "languages", "--dir", "tr"])
            .unwrap();
        assert!(!verbose_requested(&quiet));
        let before = cli()
            .try_get_matches_from(["variant-i18n", "--verbose", "languages", "--dir", "tr"])
            .unwrap();
        assert!(verbose_requested(&before));
        let after = cli()
            .try_get_matches_from(["variant-i18n", "languages", "-v", "--dir", "tr"])
            .unwrap();
        assert!(verbose_requested(&after));
    }
}
