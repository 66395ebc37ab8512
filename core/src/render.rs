//! `Name(e0, e1, ...)` rendering shared by Display and Debug impls.

use core::fmt;

pub(crate) fn render<A>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    elements: impl Iterator<Item = A>,
    mut each: impl FnMut(&mut fmt::Formatter<'_>, &A) -> fmt::Result,
) -> fmt::Result {
    f.write_str(name)?;
    f.write_str("(")?;
    for (i, element) in elements.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        each(f, &element)?;
    }
    f.write_str(")")
}
