//! Grouping of control-expression channel names into base categories.
//!
//! Channel names follow the convention `CTRL_expressions_<base><Specifier>`:
//! the parameter part starts with a lowercase base category followed by a
//! capitalized specifier (`browDownL` → `brow`, `eyeBlinkR` → `eye`,
//! `mouthSmile` → `mouth`). Grouping maps each base category to the list
//! of channel indices carrying it, for aggregating per-category statistics
//! over `[batch, seq_len, dim]` intensity curves.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

/// Channel name prefix shared by all control-expression channels.
pub const DEFAULT_PREFIX: &str = "CTRL_expressions_";

/// Extract the base category of a channel parameter name.
///
/// The category is the leading run of ASCII lowercase letters
/// (`"browDownL"` → `"brow"`). A name that does not start with a lowercase
/// letter falls back to its leading alphanumeric run, lowercased; failing
/// that, the whole name lowercased.
pub fn base_category(param: &str) -> String {
    let lower: String = param
        .chars()
        .take_while(|c| c.is_ascii_lowercase())
        .collect();
    if !lower.is_empty() {
        return lower;
    }

    let alnum: String = param
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if !alnum.is_empty() {
        return alnum.to_ascii_lowercase();
    }

    param.to_ascii_lowercase()
}

/// Group channel names by base category.
///
/// Only names carrying `prefix` participate; each category maps to the
/// indices (positions in `names`) of its channels, in input order. Names
/// without the prefix keep their index but are skipped.
pub fn group_channels<S: AsRef<str>>(names: &[S], prefix: &str) -> BTreeMap<String, Vec<usize>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut skipped = 0_usize;

    for (index, name) in names.iter().enumerate() {
        match name.as_ref().strip_prefix(prefix) {
            Some(param) => groups.entry(base_category(param)).or_default().push(index),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, prefix, "channel names without the prefix were ignored");
    }
    groups
}

/// Load channel names from a file.
///
/// A `.json` file is parsed as a JSON string array; anything else is read
/// as one name per line, with blank lines skipped.
pub fn load_channel_names(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open channel list {}: {e}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let names: Vec<String> = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| anyhow::anyhow!("Failed to parse channel list JSON: {e}"))?;
        return Ok(names);
    }

    let mut names = Vec::new();
    for line in std::io::BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_category_strips_capitalized_specifier() {
        assert_eq!(base_category("browDownL"), "brow");
        assert_eq!(base_category("eyeBlinkR"), "eye");
        assert_eq!(base_category("mouthSmile"), "mouth");
        assert_eq!(base_category("noseDownL"), "nose");
    }

    #[test]
    fn base_category_without_specifier_is_the_whole_name() {
        assert_eq!(base_category("jaw"), "jaw");
    }

    #[test]
    fn base_category_falls_back_to_alphanumeric_run() {
        // Leading digit: no lowercase run, so the alphanumeric run wins.
        assert_eq!(base_category("2browRaise"), "2browraise");
        assert_eq!(base_category("TeethUpperU"), "teethupperu");
    }

    #[test]
    fn base_category_of_non_alphanumeric_name() {
        assert_eq!(base_category("_odd"), "_odd");
    }

    #[test]
    fn group_channels_records_indices_in_input_order() {
        let names = [
            "CTRL_expressions_browDownL",
            "CTRL_expressions_eyeBlinkL",
            "CTRL_expressions_browDownR",
            "CTRL_expressions_mouthSmile",
            "CTRL_expressions_eyeBlinkR",
        ];
        let groups = group_channels(&names, DEFAULT_PREFIX);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["brow"], vec![0, 2]);
        assert_eq!(groups["eye"], vec![1, 4]);
        assert_eq!(groups["mouth"], vec![3]);
    }

    #[test]
    fn group_channels_skips_names_without_the_prefix() {
        let names = [
            "CTRL_expressions_browDownL",
            "HeadYaw",
            "CTRL_expressions_browDownR",
        ];
        let groups = group_channels(&names, DEFAULT_PREFIX);

        assert_eq!(groups.len(), 1);
        // Indices refer to positions in the original list.
        assert_eq!(groups["brow"], vec![0, 2]);
    }

    #[test]
    fn group_channels_with_custom_prefix() {
        let names = ["FACE_jawOpen", "FACE_jawLeft", "FACE_cheekPuff"];
        let groups = group_channels(&names, "FACE_");

        assert_eq!(groups["jaw"], vec![0, 1]);
        assert_eq!(groups["cheek"], vec![2]);
    }
}
