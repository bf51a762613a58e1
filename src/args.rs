//! Module for handling command line arguments.

use std::borrow::Cow;
use std::env;
use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;

use clap::{self, AppSettings, Arg, ArgMatches};
use conv::TryFrom;

use super::{NAME, VERSION, REVISION};


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.get_matches_from_safe(argv)?;
    Options::try_from(matches)
}


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// Address where the server should listen on.
    pub address: SocketAddr,

    /// Number of threads to use for image captioning.
    /// If omitted, the actual count will be based on the number of CPUs.
    pub render_threads: Option<usize>,

    /// Maximum time allowed for a single meme request.
    pub request_timeout: Duration,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}

impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Err = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Err> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let address: SocketAddr = {
            let mut addr: Cow<_> = matches.value_of(ARG_ADDR).unwrap().trim().into();

            // If the address is just a port (e.g. ":4242"),
            // then we will prepend it with the default host.
            if addr.starts_with(":") && addr.chars().skip(1).all(|c| c.is_digit(10)) {
                addr = format!("{}{}", DEFAULT_HOST, addr).into();
            }

            // Alternatively, it can be just an interface address, without a port,
            // in which case we'll add the default port.
            let is_just_ipv4 = addr.contains(".") && !addr.contains(":");
            let is_just_ipv6 = addr.starts_with("[") && addr.ends_with("]");
            if is_just_ipv4 || is_just_ipv6 {
                addr = format!("{}:{}", addr, DEFAULT_PORT).into();
            }

            addr.parse()?
        };

        let render_threads = match matches.value_of(OPT_RENDER_THREADS) {
            Some(rt) => Some(rt.parse::<usize>().map_err(ArgsError::RenderThreads)?),
            None => None,
        };

        let request_timeout = Duration::from_secs(
            matches.value_of(OPT_REQUEST_TIMEOUT).unwrap()
                .parse::<u64>().map_err(ArgsError::RequestTimeout)?);

        Ok(Options{verbosity, address, render_threads, request_timeout})
    }
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug)]
pub enum ArgsError {
    /// General error while parsing the arguments.
    Parse(clap::Error),
    /// Error while parsing the server address.
    Address(AddrParseError),
    /// Error while parsing the --render-threads flag.
    RenderThreads(ParseIntError),
    /// Error while parsing the --request-timeout flag.
    RequestTimeout(ParseIntError),
}
derive_enum_from!(clap::Error => ArgsError::Parse);
derive_enum_from!(AddrParseError => ArgsError::Address);

impl Error for ArgsError {
    fn description(&self) -> &str { "invalid command line arguments" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            ArgsError::Parse(ref e) => Some(e),
            ArgsError::Address(ref e) => Some(e),
            ArgsError::RenderThreads(ref e) => Some(e),
            ArgsError::RequestTimeout(ref e) => Some(e),
        }
    }
}
impl fmt::Display for ArgsError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgsError::Parse(ref e) => write!(fmt, "{}", e.message),
            ArgsError::Address(ref e) => write!(fmt, "invalid server address: {}", e),
            ArgsError::RenderThreads(ref e) => write!(fmt, "invalid render thread count: {}", e),
            ArgsError::RequestTimeout(ref e) => write!(fmt, "invalid request timeout: {}", e),
        }
    }
}


// Parser configuration

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");

    /// Complete version string, including the git revision if known.
    static ref FULL_VERSION: Option<String> = VERSION.map(|version| match *REVISION {
        Some(rev) => format!("{}+{}", version, rev),
        None => version.to_owned(),
    });
}

const ARG_ADDR: &'static str = "address";
const OPT_RENDER_THREADS: &'static str = "render-threads";
const OPT_REQUEST_TIMEOUT: &'static str = "request-timeout";
const OPT_VERBOSE: &'static str = "verbose";
const OPT_QUIET: &'static str = "quiet";

const DEFAULT_HOST: &'static str = "0.0.0.0";
const DEFAULT_PORT: u16 = 1337;
const DEFAULT_REQUEST_TIMEOUT: u32 = 10;


/// Create the parser for application's command line.
fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(ref version) = *FULL_VERSION {
        parser = parser.version(&**version as &str);
    }
    parser
        .about(*ABOUT)

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)
        .setting(AppSettings::ColorNever)

        .arg(Arg::with_name(ARG_ADDR)
            .value_name("ADDRESS:PORT")
            .required(false)
            .default_value(to_static_str!(format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)))
            .help("Binds the server to given address")
            .long_help(concat!(
                "The address and/or port for the server to listen on.\n\n",
                "This argument can be an IP address of a network interface, ",
                "optionally followed by colon and a port number. ",
                "Alternatively, a colon and port alone is also allowed, ",
                "in which case the server will listen on all network interfaces.")))

        // Rendering options.
        .arg(Arg::with_name(OPT_RENDER_THREADS)
            .long("render-threads")
            .value_name("N")
            .required(false)
            .help("Number of render threads to use")
            .long_help(concat!(
                "Number of threads used for image captioning.\n\n",
                "If omitted, one thread per each CPU core will be used.")))

        // Timeout flags.
        .arg(Arg::with_name(OPT_REQUEST_TIMEOUT)
            .long("request-timeout")
            .value_name("SECS")
            .required(false)
            .default_value(to_static_str!(
                // Disable request timeouts in debug mode unless specifically requested.
                if cfg!(debug_assertions) { 0 } else { DEFAULT_REQUEST_TIMEOUT }
            ))
            .help("Maximum time allowed for a single request (secs)"))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}


#[cfg(test)]
mod tests {
    use std::iter;
    use std::net::SocketAddr;
    use std::time::Duration;
    use spectral::prelude::*;
    use super::{parse_from_argv, ArgsError, Options};

    /// Parse given flags as if they came after the binary name.
    fn parse(argv: &[&str]) -> Result<Options, ArgsError> {
        parse_from_argv(iter::once("memed").chain(argv.iter().map(|a| *a)))
    }

    #[test]
    fn no_args_are_valid() {
        assert_that!(parse(&[])).is_ok();
    }

    #[test]
    fn default_address() {
        let opts = parse(&[]).unwrap();
        assert_that!(opts.address).is_equal_to("0.0.0.0:1337".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn port_only_address_gets_default_host() {
        let opts = parse(&[":8080"]).unwrap();
        assert_that!(opts.address).is_equal_to("0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn host_only_address_gets_default_port() {
        let opts = parse(&["127.0.0.1"]).unwrap();
        assert_that!(opts.address).is_equal_to("127.0.0.1:1337".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn gibberish_address_is_an_error() {
        assert_that!(parse(&["not an address"])).is_err();
    }

    #[test]
    fn verbosity_accumulates() {
        assert_that!(parse(&[]).unwrap().verbosity).is_equal_to(0);
        assert_that!(parse(&["-v"]).unwrap().verbosity).is_equal_to(1);
        assert_that!(parse(&["-v", "-v"]).unwrap().verbosity).is_equal_to(2);
        assert_that!(parse(&["-q"]).unwrap().verbosity).is_equal_to(-1);
    }

    #[test]
    fn conflicting_verbosity_flags_are_an_error() {
        assert_that!(parse(&["-v", "-q"])).is_err();
    }

    #[test]
    fn render_threads_must_be_a_number() {
        assert_that!(parse(&["--render-threads", "4"]).unwrap().render_threads)
            .is_equal_to(Some(4));
        assert_that!(parse(&["--render-threads", "lots"])).is_err();
    }

    #[test]
    fn request_timeout_is_in_seconds() {
        let opts = parse(&["--request-timeout", "5"]).unwrap();
        assert_that!(opts.request_timeout).is_equal_to(Duration::from_secs(5));
    }
}
