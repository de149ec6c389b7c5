//! HTML bodies for the Anki card fronts and backs.
//!
//! Every card is self-contained inline-styled HTML so it renders the same
//! in Anki desktop and AnkiDroid without a shared stylesheet.

use crate::core::models::{ ExamplePair, KanjiEntry, Sense, VocabEntry };

const FONT_FAMILY: &str =
    "-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,\"Noto Sans JP\",sans-serif";

/// Tier badge colors, most common quarter first.
const TIER_COLORS: [&str; 4] = ["#4caf50", "#8bc34a", "#ffc107", "#ff9800"];

/// Example sentences and example words shown per card.
const EXAMPLE_LIMIT: usize = 3;

pub struct LevelColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

/// Color scheme per level badge. Unknown labels fall back to the N5 scheme.
pub fn level_colors(level: &str) -> LevelColors {
    match level {
        "N4" => LevelColors { primary: "#11998e", secondary: "#0d7a6e" },
        "N3" => LevelColors { primary: "#f5a623", secondary: "#d68910" },
        "N2" => LevelColors { primary: "#e74c3c", secondary: "#c0392b" },
        "N1" => LevelColors { primary: "#9b59b6", secondary: "#8e44ad" },
        "kana" => LevelColors { primary: "#34495e", secondary: "#2c3e50" },
        "non_jlpt" => LevelColors { primary: "#7f8c8d", secondary: "#616a6b" },
        _ => LevelColors { primary: "#4a90e2", secondary: "#357abd" },
    }
}

fn tier_color(tier: u8) -> &'static str {
    let index = (tier.max(1) - 1) as usize;
    TIER_COLORS.get(index).copied().unwrap_or(TIER_COLORS[TIER_COLORS.len() - 1])
}

/// One sense on one line: "(noun) student; pupil [usually kana]".
/// Empty parts are dropped; a sense with no English glosses keeps its
/// part-of-speech so the line is never misleading.
pub fn format_sense(sense: &Sense) -> String {
    let mut parts = Vec::new();
    if !sense.part_of_speech.is_empty() {
        parts.push(format!("({})", sense.part_of_speech.join(", ")));
    }
    if !sense.glosses.is_empty() {
        parts.push(sense.glosses.join("; "));
    }
    if !sense.notes.is_empty() {
        parts.push(format!("[{}]", sense.notes.join(", ")));
    }
    parts.join(" ")
}

/// All senses on one line each, numbered once a word has several.
pub fn format_senses(senses: &[Sense]) -> String {
    if senses.len() == 1 {
        return format_sense(&senses[0]);
    }
    senses
        .iter()
        .enumerate()
        .map(|(index, sense)| format!("{}. {}", index + 1, format_sense(sense)))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn vocab_front(entry: &VocabEntry, level: &str) -> String {
    let primary = level_colors(level).primary;
    let word = &entry.surface_form;
    let readings = entry.readings.join(", ");

    format!(
        "<div style='font-family:{FONT_FAMILY};max-width:500px;margin:0 auto'>
  <div style='background:{primary};color:#fff;padding:24px;border-radius:12px;text-align:center;box-shadow:0 4px 8px rgba(0,0,0,0.15)'>
    <div style='font-size:42px;font-weight:bold;margin-bottom:8px;text-shadow:2px 2px 4px rgba(0,0,0,0.2)'>{word}</div>
    <div style='font-size:20px;opacity:0.95;letter-spacing:2px'>{readings}</div>
  </div>
</div>"
    )
}

pub fn kanji_front(character: char, level: &str) -> String {
    let primary = level_colors(level).primary;

    format!(
        "<div style='font-family:{FONT_FAMILY};max-width:500px;margin:0 auto'>
  <div style='background:{primary};color:#fff;padding:30px;border-radius:12px;text-align:center;box-shadow:0 4px 8px rgba(0,0,0,0.15)'>
    <div style='font-size:72px;font-weight:bold;text-shadow:3px 3px 6px rgba(0,0,0,0.25);background:rgba(255,255,255,0.15);width:100px;height:100px;line-height:100px;border-radius:50%;margin:0 auto'>{character}</div>
  </div>
</div>"
    )
}

pub fn vocab_back(
    entry: &VocabEntry,
    level: &str,
    tier: Option<u8>,
    include_examples: bool,
) -> String {
    let primary = level_colors(level).primary;
    let word = &entry.surface_form;
    let readings = entry.readings.join(", ");

    let mut badges = vec![level_badge(level, primary)];
    if entry.is_common {
        badges.push(common_badge());
    }
    if let Some(tier) = tier {
        badges.push(tier_badge(tier));
    }
    let badges = badges.concat();

    let meanings = meanings_html(&entry.senses);

    let mut examples_section = String::new();
    if include_examples {
        let examples = examples_html(&entry.examples);
        if !examples.is_empty() {
            examples_section = format!(
                "\n    <div style='background:#f8f9fa;padding:12px;border-radius:6px;border-left:3px solid {primary};margin-top:12px'>
      <div style='color:{primary};font-size:11px;font-weight:600;text-transform:uppercase;margin-bottom:8px'>Example</div>
      {examples}
    </div>"
            );
        }
    }

    format!(
        "<div style='font-family:{FONT_FAMILY};max-width:500px;margin:0 auto'>
  <div style='background:{primary};color:#fff;padding:16px;border-radius:8px 8px 0 0;text-align:center'>
    <div style='font-size:36px;font-weight:bold;margin-bottom:4px;text-shadow:1px 1px 2px rgba(0,0,0,0.2)'>{word}</div>
    <div style='font-size:18px;opacity:0.95;letter-spacing:1px'>{readings}</div>
  </div>
  <div style='background:#fff;padding:16px;border-radius:0 0 8px 8px;box-shadow:0 2px 4px rgba(0,0,0,0.1)'>
    <div style='color:{primary};font-size:11px;font-weight:600;text-transform:uppercase;border-bottom:2px solid {primary};padding-bottom:4px;margin-bottom:10px'>Meanings</div>
    <div style='font-size:14px;color:#333;line-height:1.5'>
      {meanings}
    </div>{examples_section}
    <div style='margin-top:12px;text-align:center'>
      {badges}
    </div>
  </div>
</div>"
    )
}

pub fn kanji_back(
    entry: &KanjiEntry,
    level: &str,
    tier: Option<u8>,
    example_words: &[&VocabEntry],
) -> String {
    let colors = level_colors(level);
    let primary = colors.primary;
    let secondary = colors.secondary;

    let character = entry.character;
    let meanings = entry.meanings.join("; ");
    let on_readings = entry.on_readings.join("; ");
    let kun_readings = entry.kun_readings.join("; ");
    let nanori = entry.name_readings.join("; ");

    let mut readings_html = String::new();
    if !on_readings.is_empty() || !kun_readings.is_empty() {
        let mut sections = String::new();
        if !on_readings.is_empty() {
            sections.push_str(&format!(
                "<div style='flex:1;background:#f8f9fa;padding:12px;border-radius:6px;border-top:3px solid {primary}'>
        <div style='color:{primary};font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:4px'>On'yomi</div>
        <div style='font-size:16px;color:#333'>{on_readings}</div>
      </div>"
            ));
        }
        if !kun_readings.is_empty() {
            sections.push_str(&format!(
                "<div style='flex:1;background:#f8f9fa;padding:12px;border-radius:6px;border-top:3px solid {secondary}'>
        <div style='color:{secondary};font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:4px'>Kun'yomi</div>
        <div style='font-size:16px;color:#333'>{kun_readings}</div>
      </div>"
            ));
        }
        readings_html =
            format!("<div style='display:flex;gap:10px;margin-bottom:12px'>{sections}</div>");
    }

    let mut stats_items = String::new();
    if entry.stroke_count > 0 {
        stats_items.push_str(&format!(
            "<div style='text-align:center'><div style='font-size:20px;font-weight:bold;color:{primary}'>{}</div><div style='font-size:10px;color:#999'>Strokes</div></div>",
            entry.stroke_count
        ));
    }
    if let Some(radical) = &entry.radical {
        stats_items.push_str(&format!(
            "<div style='text-align:center'><div style='font-size:18px;font-weight:bold;color:{primary}'>{radical}</div><div style='font-size:10px;color:#999'>Radical</div></div>"
        ));
    }
    if let Some(frequency) = entry.frequency_rank {
        stats_items.push_str(&format!(
            "<div style='text-align:center'><div style='font-size:16px;font-weight:bold;color:{primary}'>#{frequency}</div><div style='font-size:10px;color:#999'>Freq</div></div>"
        ));
    }

    let mut stats_html = String::new();
    if !stats_items.is_empty() {
        stats_html = format!(
            "<div style='background:#f8f9fa;padding:12px;border-radius:6px;margin-bottom:12px'>
      <div style='color:#666;font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:8px'>Stats</div>
      <div style='display:flex;justify-content:space-around'>{stats_items}</div>
    </div>"
        );
    }

    let mut nanori_html = String::new();
    if !nanori.is_empty() {
        nanori_html = format!(
            "<div style='background:#fff3e0;padding:10px;border-radius:6px;margin-bottom:12px'>
      <div style='color:#e65100;font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:4px'>Name Readings</div>
      <div style='font-size:14px;color:#333'>{nanori}</div>
    </div>"
        );
    }

    let mut references_html = String::new();
    if entry.heisig.is_some() || entry.heisig6.is_some() {
        let mut reference_parts = Vec::new();
        if let Some(heisig) = &entry.heisig {
            reference_parts.push(format!("<span>RTK: <strong>#{heisig}</strong></span>"));
        }
        if let Some(heisig6) = &entry.heisig6 {
            reference_parts.push(format!("<span>RTK6: <strong>#{heisig6}</strong></span>"));
        }
        if let Some(grade) = entry.grade {
            reference_parts.push(format!("<span>Grade: <strong>{grade}</strong></span>"));
        }
        let reference_parts = reference_parts.join(" | ");

        references_html = format!(
            "<div style='background:linear-gradient(135deg,#f5f7fa 0%,#e4e8ec 100%);padding:12px;border-radius:6px;border-left:3px solid {primary};margin-bottom:12px'>
      <div style='color:{primary};font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:6px'>References</div>
      <div style='display:flex;justify-content:space-around;font-size:13px;color:#555'>{reference_parts}</div>
    </div>"
        );
    }

    let example_words_html = example_words_html(example_words, primary);

    let mut badges = vec![level_badge(level, primary)];
    if let Some(tier) = tier {
        badges.push(tier_badge(tier));
    }
    if let Some(grade) = entry.grade {
        badges.push(grade_badge(grade));
    }
    let badges = badges.concat();

    format!(
        "<div style='font-family:{FONT_FAMILY};max-width:500px;margin:0 auto'>
  <div style='background:{primary};color:#fff;padding:20px;border-radius:8px 8px 0 0;text-align:center'>
    <div style='font-size:56px;font-weight:bold;margin-bottom:8px;text-shadow:2px 2px 4px rgba(0,0,0,0.2);background:rgba(255,255,255,0.15);width:90px;height:90px;line-height:90px;border-radius:50%;margin:0 auto 12px'>{character}</div>
    <div style='font-size:16px;opacity:0.95'>{meanings}</div>
  </div>
  <div style='background:#fff;padding:16px;border-radius:0 0 8px 8px;box-shadow:0 2px 4px rgba(0,0,0,0.1)'>
    {readings_html}
    {stats_html}
    {nanori_html}
    {references_html}
    {example_words_html}
    <div style='margin-top:12px;text-align:center'>
      {badges}
    </div>
  </div>
</div>"
    )
}

/// One bordered row per sense, with the border dropped on the last row.
fn meanings_html(senses: &[Sense]) -> String {
    let mut items: Vec<String> = senses
        .iter()
        .map(format_sense)
        .filter(|line| !line.is_empty())
        .map(|line| {
            format!(
                "<div style='padding:6px 0;border-bottom:1px solid #eee;color:#333'>{line}</div>"
            )
        })
        .collect();

    if let Some(last) = items.last_mut() {
        *last = last.replace("border-bottom:1px solid #eee", "");
    }

    items.concat()
}

fn examples_html(examples: &[ExamplePair]) -> String {
    examples
        .iter()
        .take(EXAMPLE_LIMIT)
        .enumerate()
        .map(|(index, pair)| {
            format!(
                "<div style='font-size:16px;color:#333;margin-bottom:6px'>{}. {}</div><div style='font-size:13px;color:#666;font-style:italic'>→ {}</div>",
                index + 1,
                pair.japanese,
                pair.english
            )
        })
        .collect()
}

fn example_words_html(words: &[&VocabEntry], primary: &str) -> String {
    if words.is_empty() {
        return String::new();
    }

    let mut items: Vec<String> = words
        .iter()
        .take(EXAMPLE_LIMIT)
        .map(|word| {
            let mut sense = format_senses(&word.senses);
            if sense.chars().count() > 80 {
                sense = sense.chars().take(80).collect::<String>() + "...";
            }
            format!(
                "<div style='padding:6px 0;border-bottom:1px solid #eee;font-size:13px;color:#333'><strong>{}</strong> <span style='color:#666'>({})</span> - <span style='color:#333'>{}</span></div>",
                word.surface_form,
                word.readings.join(", "),
                sense
            )
        })
        .collect();

    if let Some(last) = items.last_mut() {
        *last = last.replace("border-bottom:1px solid #eee", "");
    }
    let items = items.concat();

    format!(
        "<div style='background:#f8f9fa;padding:12px;border-radius:6px'>
      <div style='color:{primary};font-size:10px;font-weight:600;text-transform:uppercase;margin-bottom:8px'>Example Words</div>
      {items}
    </div>"
    )
}

fn level_badge(level: &str, primary: &str) -> String {
    format!(
        "<span style='display:inline-block;background:#e3f2fd;color:{primary};padding:4px 10px;border-radius:12px;font-size:11px;margin:2px'>{level}</span>"
    )
}

fn common_badge() -> String {
    "<span style='display:inline-block;background:#f3e5f5;color:#7b1fa2;padding:4px 10px;border-radius:12px;font-size:11px;margin:2px'>Common</span>"
        .to_string()
}

fn tier_badge(tier: u8) -> String {
    let color = tier_color(tier);
    format!(
        "<span style='display:inline-block;background:{color}20;color:{color};padding:4px 10px;border-radius:12px;font-size:11px;margin:2px'>Tier {tier}</span>"
    )
}

fn grade_badge(grade: u8) -> String {
    format!(
        "<span style='display:inline-block;background:#e8f5e9;color:#388e3c;padding:4px 10px;border-radius:12px;font-size:11px;margin:2px'>Grade {grade}</span>"
    )
}
