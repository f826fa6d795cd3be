//! Reading boards from PBN files
//!
//! Only the tags needed to replay a deal are read: [Board], [Deal],
//! [Contract], [Declarer], [Vulnerable] and [Result]. Blocks are separated by
//! blank lines outside `{}` comments.

use crate::contract::{Contract, Vulnerability};
use crate::hands::Hands;
use crate::types::*;
use tracing::debug;

/// One playable board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// [Board] tag, or the board's position in the file
    pub name: String,
    pub hands: Hands,
    pub contract: Contract,
    /// Declarer's tricks from the [Result] tag
    pub expected_tricks: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PbnError {
    #[error("board {board}: unreadable deal {deal:?}")]
    Deal { board: String, deal: String },

    #[error("board {board}: missing [{tag}] tag")]
    MissingTag { board: String, tag: &'static str },

    #[error("board {board}: bad [{tag}] value {value:?}")]
    BadTag {
        board: String,
        tag: &'static str,
        value: String,
    },
}

/// Parse every board that carries a [Deal]. Passed-out boards are skipped.
pub fn parse_boards(content: &str) -> Result<Vec<Board>, PbnError> {
    let mut boards = Vec::new();
    for (index, block) in split_blocks(content).iter().enumerate() {
        if let Some(board) = parse_block(block, index + 1)? {
            boards.push(board);
        }
    }
    Ok(boards)
}

/// Group lines into blocks separated by blank lines outside brace comments
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_brace_comment = false;

    for line in content.lines() {
        if line.trim().is_empty() && !in_brace_comment {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        // Braces don't nest in PBN
        for ch in line.chars() {
            match ch {
                '{' => in_brace_comment = true,
                '}' => in_brace_comment = false,
                _ => {}
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_block(lines: &[&str], position: usize) -> Result<Option<Board>, PbnError> {
    let tag = |name: &str| lines.iter().find_map(|line| extract_tag(line, name));

    let Some(deal) = tag("Deal") else {
        return Ok(None);
    };
    let name = tag("Board")
        .map(str::to_string)
        .unwrap_or_else(|| position.to_string());

    let hands = Hands::from_pbn(deal).ok_or_else(|| PbnError::Deal {
        board: name.clone(),
        deal: deal.to_string(),
    })?;

    let contract_text = tag("Contract").ok_or_else(|| PbnError::MissingTag {
        board: name.clone(),
        tag: "Contract",
    })?;
    if contract_text.eq_ignore_ascii_case("pass") {
        debug!(board = %name, "skipping passed-out board");
        return Ok(None);
    }

    let declarer_text = tag("Declarer").ok_or_else(|| PbnError::MissingTag {
        board: name.clone(),
        tag: "Declarer",
    })?;
    let declarer = declarer_text
        .chars()
        .next()
        .and_then(char_to_seat)
        .ok_or_else(|| PbnError::BadTag {
            board: name.clone(),
            tag: "Declarer",
            value: declarer_text.to_string(),
        })?;

    let vulnerability = match tag("Vulnerable") {
        Some(value) => Vulnerability::from_pbn(value).ok_or_else(|| PbnError::BadTag {
            board: name.clone(),
            tag: "Vulnerable",
            value: value.to_string(),
        })?,
        None => Vulnerability::None,
    };

    let contract =
        Contract::parse(contract_text, declarer, vulnerability).map_err(|_| PbnError::BadTag {
            board: name.clone(),
            tag: "Contract",
            value: contract_text.to_string(),
        })?;

    let expected_tricks = match tag("Result").filter(|value| !value.is_empty()) {
        Some(value) => {
            let tricks = value.parse::<u8>().map_err(|_| PbnError::BadTag {
                board: name.clone(),
                tag: "Result",
                value: value.to_string(),
            })?;
            Some(tricks)
        }
        None => None,
    };

    Ok(Some(Board {
        name,
        hands,
        contract,
        expected_tricks,
    }))
}

/// Value of a `[Name "value"]` tag line
fn extract_tag<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('[')?.strip_prefix(name)?;
    if !rest.starts_with(' ') {
        return None;
    }
    let start = rest.find('"')? + 1;
    let end = rest.rfind('"')?;
    (end >= start).then(|| rest[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"
[Event "Test"]
[Board "1"]
[Dealer "N"]
[Vulnerable "None"]
[Deal "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"]
[Declarer "S"]
[Contract "3NT"]
[Result "9"]

{ A comment block

spanning a blank line }
[Board "2"]
[Vulnerable "Both"]
[Deal "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"]
[Declarer "N"]
[Contract "4SX"]

[Board "3"]
[Deal "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"]
[Contract "Pass"]
"#;

    #[test]
    fn test_extract_tag() {
        assert_eq!(extract_tag(r#"[Deal "N:A..."]"#, "Deal"), Some("N:A..."));
        assert_eq!(extract_tag(r#"[Dealer "N"]"#, "Deal"), None);
        assert_eq!(extract_tag(r#"[Result ""]"#, "Result"), Some(""));
        assert_eq!(extract_tag("no tag", "Deal"), None);
    }

    #[test]
    fn test_parse_boards() {
        let boards = parse_boards(CORPUS).unwrap();
        assert_eq!(boards.len(), 2);

        assert_eq!(boards[0].name, "1");
        assert_eq!(boards[0].contract.to_string(), "3NT by S");
        assert_eq!(boards[0].expected_tricks, Some(9));

        assert_eq!(boards[1].name, "2");
        assert_eq!(boards[1].contract.to_string(), "4SX by N");
        assert!(boards[1].contract.declarer_vulnerable());
        assert_eq!(boards[1].expected_tricks, None);
    }

    #[test]
    fn test_curated_corpus_parses() {
        let boards = parse_boards(include_str!("../demos/curated.pbn")).unwrap();
        assert_eq!(boards.len(), 7);
        assert!(boards.iter().all(|b| b.contract.declarer() == SOUTH));
        assert!(boards.iter().all(|b| b.expected_tricks.is_some()));
        assert_eq!(boards[3].contract.to_string(), "7NT by S");
        assert_eq!(boards[3].expected_tricks, Some(13));
    }

    #[test]
    fn test_bad_tags_are_reported() {
        let missing = "[Deal \"N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72\"]\n[Contract \"3NT\"]\n";
        assert_eq!(
            parse_boards(missing),
            Err(PbnError::MissingTag {
                board: "1".to_string(),
                tag: "Declarer"
            })
        );

        let bad_deal = "[Board \"7\"]\n[Deal \"N:AK\"]\n";
        assert!(matches!(parse_boards(bad_deal), Err(PbnError::Deal { .. })));
    }
}
