use crate::error::{Error, Result};
use clap::{App, AppSettings, Arg, ErrorKind};

pub const USAGE: &str = "lc3 [image-file1] ...";

/// Positional token that turns on the debugger, as an alternative to `--debug`.
const DEBUG_TOKEN: &str = "debug";

#[derive(Debug, PartialEq)]
pub struct Config {
    pub images: Vec<String>,
    pub debug: bool,
    /// Set when the first image was also the first positional argument. Only then may it fail to
    /// load without stopping the run.
    pub first_image_optional: bool,
}

impl Config {
    /// Parses a full argument list, program name first.
    pub fn with(args: &[String]) -> Result<Self> {
        let matches = app().get_matches_from_safe(args).map_err(|e| match e.kind {
            ErrorKind::HelpDisplayed => Error::Help(e.message),
            _ => Error::Config(e.message),
        })?;

        let mut config = Self {
            images: Vec::new(),
            debug: matches.is_present("debug"),
            first_image_optional: false,
        };

        for (position, arg) in matches.values_of("IMAGE").into_iter().flatten().enumerate() {
            if arg == DEBUG_TOKEN {
                config.debug = true;
            } else {
                if position == 0 {
                    config.first_image_optional = true;
                }
                config.images.push(arg.to_string());
            }
        }

        if config.images.is_empty() {
            return Err(Error::MissingImage);
        }

        Ok(config)
    }
}

fn app() -> App<'static, 'static> {
    App::new("LC-3 VM")
        .usage(USAGE)
        .setting(AppSettings::DisableVersion)
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Prompts for breakpoints before running"),
        )
        .arg(
            Arg::with_name("IMAGE")
                .help("Object files to load, in order")
                .multiple(true)
                .index(1),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn config_valid_arguments() {
        let config = Config::with(&args(&["lc3", "filename"])).unwrap();

        assert_eq!(config.images, vec![String::from("filename")]);
        assert_eq!(config.debug, false);
        assert_eq!(config.first_image_optional, true);
    }

    #[test]
    fn config_not_enough_arguments() {
        assert!(matches!(
            Config::with(&args(&["lc3"])),
            Err(Error::MissingImage)
        ));
    }

    #[test]
    fn config_only_debug_is_not_enough() {
        assert!(matches!(
            Config::with(&args(&["lc3", "debug"])),
            Err(Error::MissingImage)
        ));
    }

    #[test]
    fn config_with_debug_flag() {
        let config = Config::with(&args(&["lc3", "filename", "--debug"])).unwrap();

        assert_eq!(config.images, vec![String::from("filename")]);
        assert_eq!(config.debug, true);
        assert_eq!(config.first_image_optional, true);
    }

    #[test]
    fn config_with_debug_token_first() {
        let config = Config::with(&args(&["lc3", "debug", "os.obj", "program.obj"])).unwrap();

        assert_eq!(
            config,
            Config {
                images: vec![String::from("os.obj"), String::from("program.obj")],
                debug: true,
                first_image_optional: false,
            }
        );
    }

    #[test]
    fn config_help() {
        assert!(matches!(
            Config::with(&args(&["lc3", "--help"])),
            Err(Error::Help(_))
        ));
    }

    #[test]
    fn config_unknown_flag() {
        assert!(matches!(
            Config::with(&args(&["lc3", "--verbose", "program.obj"])),
            Err(Error::Config(_))
        ));
    }
}
