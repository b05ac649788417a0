use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Opacity under which a scrim leaves cells untouched.
const SCRIM_VISIBLE: f64 = 0.01;

/// Writes `input` starting at display column `start_col`, at most `max_cols` wide.
///
/// Wide characters that would straddle either edge are skipped. Tabs expand to four spaces.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;

    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let (symbol, w) = if ch == '\t' {
            (" ", 1)
        } else {
            match UnicodeWidthChar::width(ch) {
                Some(w) if w > 0 => (&*ch.encode_utf8(&mut tmp), w),
                _ => continue,
            }
        };
        let repeat = if ch == '\t' { 4 } else { 1 };

        for _ in 0..repeat {
            if col + w <= start_col || col < start_col {
                col += w;
                continue;
            }
            if out_cols + w > max_cols {
                return;
            }
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol(symbol);
            }
            dx += 1;
            out_cols += 1;
            col += w;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                dx += 1;
                out_cols += 1;
            }
        }
    }
}

/// Centres `input` on row `y` of `area`, clipping when it does not fit.
pub fn render_str_centered(area: Rect, y: u16, buf: &mut Buffer, input: &str, style: Style) {
    let width = unicode_width::UnicodeWidthStr::width(input).min(area.width as usize) as u16;
    let x = area.x + (area.width - width) / 2;
    render_str_clipped(x, y, 0, width, buf, input, style);
}

/// Darkens every cell of `area` toward `color` by `opacity` (0.0..=1.0).
///
/// RGB colours are blended; indexed and named colours cannot be blended, so they are dimmed
/// instead once the scrim is visible at all.
pub fn render_scrim(area: Rect, buf: &mut Buffer, color: Color, opacity: f64) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity < SCRIM_VISIBLE {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            let fg = blend(cell.fg, color, opacity);
            let bg = blend(cell.bg, color, opacity);
            match (fg, bg) {
                (Some(fg), Some(bg)) => {
                    cell.set_fg(fg);
                    cell.set_bg(bg);
                }
                _ => {
                    cell.modifier.insert(Modifier::DIM);
                }
            }
        }
    }
}

fn blend(base: Color, over: Color, opacity: f64) -> Option<Color> {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (base, rgb(over)) else {
        return None;
    };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * opacity).round() as u8;
    Some(Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2)))
}

fn rgb(color: Color) -> Color {
    match color {
        Color::Black => Color::Rgb(0, 0, 0),
        Color::White => Color::Rgb(255, 255, 255),
        other => other,
    }
}
