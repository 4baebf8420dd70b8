//! Plain-text renderers.
//!
//! Every renderer writes through `fmt::Write`; the first failed write
//! stops rendering and is returned.

use super::BuildInfo;
use crate::domain::entities::{LocationInfo, NamedValue};
use crate::domain::request::RequestContext;
use std::fmt::{self, Write};

const RULE: &str = "---------";

/// Full report: request line, headers, params and location.
pub fn full<W: Write>(
    w: &mut W,
    request: &RequestContext,
    headers: &[NamedValue],
    params: &[NamedValue],
    info: &LocationInfo,
) -> fmt::Result {
    writeln!(w, "IP: {}", info.ip)?;
    writeln!(w, "Proto: {}", request.proto())?;
    writeln!(w, "Method: {}", request.method())?;
    writeln!(w, "URI: {}", request.uri())?;

    write!(w, "\nHeaders\n{}\n", RULE)?;
    pairs(w, headers)?;

    write!(w, "\nParams\n{}\n", RULE)?;
    pairs(w, params)?;

    write!(w, "\nLocations\n{}\n", RULE)?;
    writeln!(w, "Country: {}", info.country)?;
    writeln!(w, "City: {}", info.city)?;
    writeln!(w, "Latitude: {}", info.latitude)?;
    writeln!(w, "Longitude: {}", info.longitude)?;
    writeln!(w, "TimeZone: {}", info.time_zone)?;
    writeln!(w, "TimeUTC: {}", info.utc_time)
}

fn pairs<W: Write>(w: &mut W, values: &[NamedValue]) -> fmt::Result {
    for v in values {
        writeln!(w, "{}: {}", v.name, v.value)?;
    }
    Ok(())
}

/// Address, place and both clocks.
pub fn short<W: Write>(w: &mut W, info: &LocationInfo) -> fmt::Result {
    writeln!(w, "IP:         {}", info.ip)?;
    writeln!(w, "Country:    {}", info.country)?;
    writeln!(w, "City:       {}", info.city)?;
    writeln!(w, "Local time: {}", info.local_time())?;
    writeln!(w, "UTC time:   {}", info.utc_time)
}

/// Three lines: place, address, local clock.
pub fn compact<W: Write>(w: &mut W, info: &LocationInfo) -> fmt::Result {
    let (_, local_time) = info.local_date_time();
    writeln!(w, "{} {}", info.country, info.city)?;
    writeln!(w, "{}", info.ip)?;
    writeln!(w, "{}", local_time)
}

pub fn version<W: Write>(w: &mut W, build: &BuildInfo) -> fmt::Result {
    writeln!(w, "Version:    {}", build.version)?;
    writeln!(w, "Revision:   {}", build.revision)?;
    writeln!(w, "Build date: {}", build.build_date)
}
