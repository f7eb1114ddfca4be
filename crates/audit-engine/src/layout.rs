//! Logical line reconstruction from positioned PDF text fragments.
//!
//! PDFs often store text out of reading order or as individual glyph
//! runs. Fragments are regrouped into lines by Y-coordinate proximity,
//! then ordered left to right within each line.

use audit_types::TextFragment;

/// Fragments within this many units of Y are treated as the same
/// visual line. Fixed heuristic; no dynamic calibration.
pub const Y_TOLERANCE: f64 = 5.0;

/// Reconstructs reading-order text from one page's fragments.
///
/// Fragments are sorted by descending Y (PDF origin is bottom-left, so
/// the top of the page comes first) and walked in that order: a new
/// line starts whenever a fragment's Y drifts more than
/// [`Y_TOLERANCE`] from the current line's anchor Y. Within a line,
/// fragments are ordered by ascending X (stable, so equal-X fragments
/// keep their input order) and joined with single spaces.
pub fn reconstruct_lines(fragments: &[TextFragment]) -> String {
    if fragments.is_empty() {
        return String::new();
    }

    let mut by_y: Vec<&TextFragment> = fragments.iter().collect();
    by_y.sort_by(|a, b| b.y.total_cmp(&a.y));

    // Walk top to bottom, opening a new line whenever Y leaves the
    // tolerance band around the current line's anchor.
    let mut lines: Vec<Vec<&TextFragment>> = Vec::new();
    let mut anchor_y = f64::INFINITY;
    for fragment in by_y {
        match lines.last_mut() {
            Some(line) if (anchor_y - fragment.y).abs() <= Y_TOLERANCE => line.push(fragment),
            _ => {
                anchor_y = fragment.y;
                lines.push(vec![fragment]);
            }
        }
    }

    let mut reconstructed = String::new();
    for (i, line) in lines.iter_mut().enumerate() {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
        if i > 0 {
            reconstructed.push('\n');
        }
        for (j, fragment) in line.iter().enumerate() {
            if j > 0 {
                reconstructed.push(' ');
            }
            reconstructed.push_str(&fragment.text);
        }
    }

    reconstructed
}
