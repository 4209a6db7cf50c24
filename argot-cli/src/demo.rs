//! Demo commands and the `Point` type they use.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use argot_core::ArgParser;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("expected x,y but got '{0}'")]
    Format(String),

    #[error("invalid coordinate '{0}'")]
    Coordinate(String),
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePointError::Format(s.to_string()))?;
        let coordinate = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| ParsePointError::Coordinate(part.to_string()))
        };

        Ok(Point {
            x: coordinate(x)?,
            y: coordinate(y)?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn foo(x: i32) {
    println!("foo called with {}", x);
}

fn bar(name: String, value: f32) {
    println!("bar called with {} and {}", name, value);
}

fn add(a: i32, b: i32) {
    println!("{} + {} = {}", a, b, a + b);
}

fn show_point(p: Point) {
    println!("Point is {}", p);
}

/// The verbose flag under the parser's configured prefix, e.g. `--verbose`.
pub fn verbose_flag(parser: &ArgParser) -> String {
    format!("{}verbose", parser.flag_prefix())
}

/// Register the demo commands, the `Point` converter and the verbose flag.
pub fn register(parser: &mut ArgParser) -> Result<()> {
    parser.add_command("foo", "Test foo command", foo)?;
    parser.add_command("bar", "Test bar command", bar)?;
    parser.add_command("add", "Add two numbers", add)?;
    parser.add_command("show_point", "Show Point coordinates", show_point)?;

    // show_point is registered first; the converter only has to exist at dispatch time.
    parser.add_conversion(|token: &str| token.parse::<Point>());

    let verbose = verbose_flag(parser);
    parser.add_flag(verbose)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::ParserConfig;

    #[test]
    fn parses_points() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point { x: 3, y: 4 });
        assert_eq!(" -1 , 2 ".parse::<Point>().unwrap(), Point { x: -1, y: 2 });
        assert_eq!(
            "34".parse::<Point>().unwrap_err(),
            ParsePointError::Format("34".to_string())
        );
        assert_eq!(
            "3,y".parse::<Point>().unwrap_err(),
            ParsePointError::Coordinate("y".to_string())
        );
    }

    #[test]
    fn demo_commands_dispatch() {
        let mut parser = ArgParser::new();
        register(&mut parser).unwrap();

        assert_eq!(parser.commands().len(), 4);
        assert!(parser.dispatch(&["show_point", "1,2"]).unwrap().is_executed());
        assert!(parser.dispatch(&["bar", "name", "1.5", "--verbose"]).unwrap().is_executed());
        assert!(parser.has_flag("--verbose"));
        assert!(parser.dispatch(&["show_point", "oops"]).is_err());
    }

    #[test]
    fn verbose_flag_follows_the_prefix() {
        let config = ParserConfig {
            flag_prefix: "+".to_string(),
            ..ParserConfig::default()
        };
        let mut parser = ArgParser::with_config(config).unwrap();
        register(&mut parser).unwrap();

        assert_eq!(verbose_flag(&parser), "+verbose");
        assert!(parser.help().contains("  +verbose\n"));
        assert!(!parser.help().contains("--verbose"));

        parser.dispatch(&["add", "1", "2", "+verbose"]).unwrap();
        assert!(parser.has_flag("+verbose"));
    }
}
