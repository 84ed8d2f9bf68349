// ABOUTME: Renders pipeline results as the labeled plain-text blocks printed to stdout.
// ABOUTME: One block per stage as it finishes, then a closing summary repeating memo and scores.

use std::io::{self, Write};

pub const SUMMARY_BANNER: &str = "##### VENTURESYNAPSE-X POC OUTPUT #####";

/// Header line for a stage block, e.g. `=== DiscoveryAgent ===`.
pub fn stage_header(agent: &str) -> String {
    format!("=== {} ===", agent)
}

/// Write one stage's output block.
pub fn write_stage<W: Write>(out: &mut W, agent: &str, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", stage_header(agent))?;
    writeln!(out, "{}", text.trim())?;
    out.flush()
}

/// Write the closing block: the memo, then the scoring output for quick copy.
pub fn write_summary<W: Write>(out: &mut W, memo: &str, scoring: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{}", SUMMARY_BANNER)?;
    writeln!(out, "{}", memo.trim())?;
    writeln!(out)?;
    writeln!(out, "Scores (for quick copy):")?;
    writeln!(out, "{}", scoring.trim())?;
    out.flush()
}
