//! Helvetica text metrics
//!
//! The built-in PDF fonts carry no metrics, so widths come from the
//! standard AFM tables (units of 1/1000 em). Used for right/center
//! alignment and for wrapping the meal plan to the page width.

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Characters outside the table are measured as a digit
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Built-in Helvetica variants used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

fn char_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        // Oblique shares the upright widths
        FontStyle::Regular | FontStyle::Italic => &HELVETICA,
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '•' => 350,
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in millimetres
pub fn text_width_mm(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, style) as u32).sum();
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap to `max_width_mm`. Words wider than a whole line are
/// split between characters.
pub fn wrap_to_width(text: &str, max_width_mm: f32, style: FontStyle, size_pt: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, style, size_pt) <= max_width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
        } else {
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width_mm("HealthAI", FontStyle::Regular, 8.0);
        let large = text_width_mm("HealthAI", FontStyle::Regular, 16.0);
        assert!((large - 2.0 * small).abs() < 0.001);
    }

    #[test]
    fn test_known_width() {
        // 10 digits x 556 units at 10pt = 55.6pt
        let width = text_width_mm("0123456789", FontStyle::Regular, 10.0);
        assert!((width - 55.6 * PT_TO_MM).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width_mm("PATIENT INFORMATION", FontStyle::Regular, 11.0);
        let bold = text_width_mm("PATIENT INFORMATION", FontStyle::Bold, 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_to_width("• Calcium-rich foods daily", 160.0, FontStyle::Regular, 10.0);
        assert_eq!(lines, vec!["• Calcium-rich foods daily".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Breakfast: oatmeal with berries and a handful of walnuts, followed by \
                    unsweetened green tea and a small portion of plain Greek yogurt";
        let lines = wrap_to_width(text, 60.0, FontStyle::Regular, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, FontStyle::Regular, 10.0) <= 60.0, "{}", line);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_long_word_is_split() {
        let word = "W".repeat(40);
        let lines = wrap_to_width(&word, 30.0, FontStyle::Regular, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
