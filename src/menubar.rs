use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

/// Draw the menu bar on the top row: key hints separated by two spaces.
pub fn print_menubar<W: Write>(out: &mut W, items: &[&str]) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        for (text, key) in split_keys(item) {
            let attr = if key {
                style::Attribute::Bold
            } else {
                style::Attribute::Dim
            };
            queue!(
                out,
                style::SetAttribute(attr),
                style::Print(text),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
    }
    Ok(())
}

/// Split a hint like `"[s] start"` into runs, flagging the bracketed keys.
fn split_keys(item: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            runs.push((rest, false));
            break;
        };
        if open > 0 {
            runs.push((&rest[..open], false));
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                runs.push((&rest[..=close], true));
                rest = &rest[close + 1..];
            }
            None => {
                runs.push((rest, false));
                break;
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_mark_keys() {
        assert_eq!(
            split_keys("[a][d] rotate"),
            [("[a]", true), ("[d]", true), (" rotate", false)]
        );
        assert_eq!(split_keys("plain"), [("plain", false)]);
        assert_eq!(split_keys("odd [open"), [("odd ", false), ("[open", false)]);
    }

    #[test]
    fn writes_every_hint() -> anyhow::Result<()> {
        let mut out = Vec::new();
        print_menubar(&mut out, &["[s] start", "[Esc] quit"])?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("[s]") && text.contains(" start") && text.contains("[Esc]"));
        Ok(())
    }
}
