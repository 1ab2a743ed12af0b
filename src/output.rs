use std::io;

use crate::geometry::Ring;

/// Writes one `x y` line per ring point, in traversal order.
///
/// The closing point is written too, so the first and last lines coincide.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_ring<W: io::Write>(ring: &Ring, out: &mut W) -> io::Result<()> {
    for point in ring.points() {
        writeln!(out, "{} {}", point.x, point.y)?;
    }
    Ok(())
}
