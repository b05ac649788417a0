use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::Wrap;
use ratatui_helpers::binding::Binding;
use ratatui_helpers::bottom_sheet::BottomSheet;
use ratatui_helpers::bottom_sheet::BottomSheetOptions;
use ratatui_helpers::bottom_sheet::SheetAction;
use ratatui_helpers::crossterm_input::input_event_from_crossterm;
use ratatui_helpers::ext::FormatCurrency;
use ratatui_helpers::feedback::Feedback;
use ratatui_helpers::feedback::TerminalBell;
use ratatui_helpers::geometry::SheetHeight;
use ratatui_helpers::modifiers::WidgetExt;
use ratatui_helpers::search_bar::SearchBar;
use ratatui_helpers::search_bar::SearchBarAction;
use ratatui_helpers::theme::Theme;
use std::cell::Cell;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

const FRAME: Duration = Duration::from_millis(16);

const ITEMS: &[(&str, f64)] = &[
    ("Espresso", 2.5),
    ("Flat white", 3.8),
    ("Pour over", 4.25),
    ("Cold brew", 4.0),
    ("Office beans (1 kg)", 1249.99),
];

struct App {
    theme: Theme,
    presented: Rc<Cell<bool>>,
    query: Rc<RefCell<String>>,
    sheet: BottomSheet,
    search: SearchBar,
    bell: TerminalBell<io::Stdout>,
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let presented = Rc::new(Cell::new(false));
    let query = Rc::new(RefCell::new(String::new()));
    let sheet = BottomSheet::with_options(
        Binding::from_cell(Rc::clone(&presented)),
        BottomSheetOptions {
            height: SheetHeight::ThreeQuarter,
            ..BottomSheetOptions::from_theme(&theme)
        },
    );
    let search = SearchBar::new(
        Binding::from_ref_cell(Rc::clone(&query)),
        Binding::constant(false),
        "Search menu",
    );
    let mut app = App {
        theme,
        presented,
        query,
        sheet,
        search,
        bell: TerminalBell::stdout(),
    };

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let start = Instant::now();
    let mut last_frame = Instant::now();
    loop {
        let mut search_area = None;
        terminal.draw(|f| {
            let area = f.area();
            let (header, body) = split_header(area);
            let buf = f.buffer_mut();

            let hint = Span::styled("Space: open sheet   q: quit", app.theme.text_muted);
            buf.set_span(header.x, header.y, &hint, header.width);
            Paragraph::new(
                "Drag the sheet down past a fifth of its height, flick it, tap the dimmed area, \
                 or press Esc to dismiss it.",
            )
            .wrap(Wrap { trim: true })
            .render(body, buf);

            let query = app.query.borrow().to_lowercase();
            let search = &mut app.search;
            let theme = &app.theme;
            app.sheet.render(area, buf, |content, buf| {
                if content.height == 0 {
                    return;
                }
                let bar = Rect::new(content.x, content.y, content.width, 1);
                search.render(bar, buf);
                search_area = Some(bar);

                let list = Rect::new(
                    content.x,
                    content.y + 1,
                    content.width,
                    content.height.saturating_sub(1),
                );
                let lines: Vec<String> = ITEMS
                    .iter()
                    .filter(|(name, _)| name.to_lowercase().contains(&query))
                    .map(|(name, price)| format!("{name:<24}{}", price.format_currency()))
                    .collect();
                for (i, line) in lines.iter().take(list.height as usize).enumerate() {
                    let span = Span::styled(line.as_str(), theme.text_primary);
                    buf.set_span(list.x + 1, list.y + i as u16, &span, list.width);
                }
                Paragraph::new(" No matches")
                    .style(theme.text_muted)
                    .hidden(!lines.is_empty())
                    .render(list, buf);
            });

            if let (Some(bar), Some(_)) = (search_area, app.sheet.panel_area())
                && let Some(pos) = app.search.cursor_pos(bar)
            {
                f.set_cursor_position(pos);
            }
        })?;

        let timeout = if app.sheet.is_animating() {
            FRAME.saturating_sub(last_frame.elapsed())
        } else {
            Duration::from_millis(250)
        };
        if crossterm::event::poll(timeout)? {
            let event = crossterm::event::read()?;
            if let Event::Key(key) = &event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !app.search.is_editing() {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char(' ') => {
                            app.sheet.present();
                            continue;
                        }
                        _ => {}
                    }
                }
            }
            let Some(ev) = input_event_from_crossterm(event) else {
                continue;
            };

            if app.presented.get() {
                match app.search.input(ev.clone()) {
                    SearchBarAction::None => {}
                    _ => continue,
                }
            }
            if app.search.is_editing() {
                continue;
            }
            if app.sheet.handle_event(ev, start.elapsed()) == SheetAction::Dismissed {
                app.search.cancel();
                app.bell.impact_occurred().map_err(io::Error::other)?;
            }
        }

        let now = Instant::now();
        app.sheet.tick(now - last_frame);
        last_frame = now;
    }
}

fn split_header(area: Rect) -> (Rect, Rect) {
    let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
    let body = Rect::new(
        area.x,
        area.y + header.height + 1,
        area.width,
        area.height.saturating_sub(header.height + 1),
    );
    (header, body)
}
