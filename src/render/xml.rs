//! XML renderer.

use crate::domain::entities::LocationInfo;
use std::fmt::{self, Write};

/// Standard XML declaration, written before the document.
pub const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const ROOT: &str = "ipinfo";

/// `LocationInfo` as an `<ipinfo>` document, one element per JSON key.
pub fn location<W: Write>(w: &mut W, info: &LocationInfo) -> fmt::Result {
    let body = quick_xml::se::to_string_with_root(ROOT, info).map_err(|_| fmt::Error)?;
    w.write_str(DECLARATION)?;
    writeln!(w, "{}", body)
}
