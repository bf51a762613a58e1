//!
//! memed -- Memes on demand
//!

             extern crate ansi_term;
             extern crate atomic;
             extern crate clap;
             extern crate conv;
             extern crate futures;
             extern crate futures_cpupool;
             extern crate hyper;
             extern crate image;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
             extern crate mime;
             extern crate multipart;
             extern crate num;
             extern crate rusttype;
#[macro_use] extern crate serde_json;
             extern crate slog_envlogger;
             extern crate slog_stdlog;
             extern crate slog_stream;
             extern crate time;
             extern crate tokio_timer;

// `slog` must precede `log` in declarations here, because we want to simultaneously:
// * use the standard `log` macros (at least for a while)
// * be able to initialize the slog logger using slog macros like o!()
#[macro_use] extern crate slog;
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


#[macro_use]
mod util;

mod args;
mod caption;
mod ext;
mod fonts;
mod handlers;
mod logging;
mod model;
mod service;


use std::env;
use std::io::{self, Write};
use std::process::exit;

use hyper::server::Http;

use args::ArgsError;
use caption::CAPTIONER;
use service::Memed;


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("memed");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

    /// Current git revision, written out by the build script (if available).
    static ref REVISION: Option<&'static str> = {
        let rev = include_str!(concat!(env!("OUT_DIR"), "/revision")).trim();
        if rev.is_empty() { None } else { Some(rev) }
    };
}


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e).unwrap();
        exit(2);
    });

    logging::init(opts.verbosity).unwrap();
    if cfg!(debug_assertions) {
        warn!("Debug mode! The server will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        trace!("argv[{}] = {:?}", i, arg);
    }
    debug!("Options parsed from argv:\n{:#?}", opts);

    if let Some(threads) = opts.render_threads {
        CAPTIONER.set_thread_count(threads);
    }
    CAPTIONER.set_task_timeout(opts.request_timeout);

    info!("Starting {} v{} to listen on {}...",
        *NAME, VERSION.unwrap_or("?"), opts.address);
    let server = Http::new().bind(&opts.address, || Ok(Memed)).unwrap();

    debug!("Entering event loop...");
    server.run().unwrap();
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e),
    }
}
