//! One GET attempt: stream a 2xx response body into the destination file.
//!
//! The destination is only opened (and truncated) once a 2xx body starts, so
//! an error response never clobbers a file from an earlier attempt.

use super::FetchOptions;
use crate::retry::FetchError;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str;

/// Maximum redirects followed per attempt.
const MAX_REDIRECTS: u32 = 10;

/// Performs a single GET of `url` into `destination`. Returns bytes written.
pub(super) fn get_to_file(
    url: &str,
    destination: &Path,
    opts: &FetchOptions,
) -> Result<u64, FetchError> {
    // Status line of the most recent response (redirect hops overwrite it).
    let status: RefCell<Option<(u32, String)>> = RefCell::new(None);
    let mut sink: Option<File> = None;
    let mut written = 0u64;
    let mut write_err: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.timeout)?;
    // Abort a transfer that moves less than 1 byte/s for the whole timeout window.
    easy.low_speed_limit(1)?;
    easy.low_speed_time(opts.timeout)?;
    easy.ssl_verify_peer(opts.verify_tls)?;
    easy.ssl_verify_host(opts.verify_tls)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Some(line) = str::from_utf8(data).ok().and_then(parse_status_line) {
                *status.borrow_mut() = Some(line);
            }
            true
        })?;
        transfer.write_function(|data| {
            let success = matches!(&*status.borrow(), Some((code, _)) if is_success(*code));
            if !success {
                // Error body: drain it without touching the destination.
                return Ok(data.len());
            }
            if sink.is_none() {
                match File::create(destination) {
                    Ok(f) => sink = Some(f),
                    Err(e) => {
                        write_err = Some(e);
                        return Ok(0);
                    }
                }
            }
            if let Some(f) = sink.as_mut() {
                if let Err(e) = f.write_all(data) {
                    write_err = Some(e);
                    return Ok(0);
                }
            }
            written += data.len() as u64;
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(e.into());
    }
    performed?;

    let code = easy.response_code()?;
    if !is_success(code) {
        let reason = status
            .into_inner()
            .filter(|(c, _)| *c == code)
            .map(|(_, r)| r)
            .unwrap_or_default();
        return Err(FetchError::Http { code, reason });
    }

    match sink {
        Some(mut f) => f.flush()?,
        // 2xx with an empty body still replaces the destination.
        None => {
            File::create(destination)?;
        }
    }
    Ok(written)
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Parses `HTTP/1.1 404 Not Found` into `(404, "Not Found")`.
fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}
