use lingocard_lib::cards::{CardStatus, ContextCategory, Meaning, VocabularyCard};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn category_color(category: ContextCategory) -> &'static str {
    match category {
        ContextCategory::English => Color::BLUE,
        ContextCategory::Korean => Color::MAGENTA,
        ContextCategory::Formal => Color::GRAY,
        ContextCategory::Casual => Color::YELLOW,
        ContextCategory::General => Color::GREEN,
        ContextCategory::Academic => Color::CYAN,
        ContextCategory::Other => Color::DIM,
    }
}

pub fn status_color(status: CardStatus) -> &'static str {
    match status {
        CardStatus::New => Color::CYAN,
        CardStatus::Learning => Color::YELLOW,
        CardStatus::Mastered => Color::GREEN,
    }
}

/// Term line with pronunciation and detected language
pub fn render_heading(card: &VocabularyCard, use_color: bool) -> String {
    let mut line = paint(&card.term, Color::BOLD, use_color);
    if let Some(pron) = card.pronunciation() {
        line.push_str(&format!(" {}", paint(&format!("[{}]", pron), Color::DIM, use_color)));
    }
    let lang = format!(
        "({}, {})",
        card.detected_language,
        card.detected_language.speech_locale()
    );
    line.push_str(&format!(" {}", paint(&lang, Color::GRAY, use_color)));
    line
}

/// One meaning as a labelled block
pub fn render_meaning(meaning: &Meaning, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let label = format!("[{}]", meaning.context_type);
    lines.push(format!(
        "{} {}",
        paint(&label, category_color(meaning.category()), use_color),
        meaning.definition
    ));

    if !meaning.nuance.is_empty() {
        lines.extend(wrap_lines(&meaning.nuance, "    ", 80));
    }
    if !meaning.example.original.is_empty() {
        let example = format!("\u{201c}{}\u{201d}", meaning.example.original);
        lines.push(format!("    {}", paint(&example, Color::ITALIC, use_color)));
        if !meaning.example.translation.is_empty() {
            lines.push(format!("    {}", paint(&meaning.example.translation, Color::DIM, use_color)));
        }
    }
    lines
}

/// A card with the given meanings, for lookup output
pub fn render_card(card: &VocabularyCard, meanings: &[&Meaning], use_color: bool) -> String {
    let mut lines = vec![render_heading(card, use_color)];
    if let Some(cross_ref) = card.cross_ref_term.as_deref().filter(|t| !t.is_empty()) {
        lines.push(paint(&format!("see also: {}", cross_ref), Color::DIM, use_color));
    }

    for meaning in meanings {
        lines.push(String::new());
        lines.extend(render_meaning(meaning, use_color));
    }

    lines.join("\n")
}

/// Back side of a review card: the display meaning first, then the rest
pub fn render_card_back(card: &VocabularyCard, use_color: bool) -> String {
    let display = card.display_meaning();
    let mut ordered: Vec<&Meaning> = display.into_iter().collect();
    ordered.extend(
        card.meanings
            .iter()
            .filter(|m| display.map_or(true, |d| !std::ptr::eq(*m, d))),
    );
    render_card(card, &ordered, use_color)
}

/// Shorten `text` to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() > effective_width {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            } else {
                current_line.push(' ');
                current_line.push_str(word);
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}
