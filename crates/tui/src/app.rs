use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hchart_core::{
    ChartConfig, ChartEvent, FramePayload, FrameRenderer, HTreeChart, IntervalNode, NavKey,
};
use hchart_protocol::{Point, Size};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use crate::surface::TermSurface;

type Chart<'t> = HTreeChart<'t, FramePayload>;

pub fn run(tree: &IntervalNode<FramePayload>, config: ChartConfig) -> Result<()> {
    let mut chart = HTreeChart::builder(Some(tree))
        .renderer(FrameRenderer)
        .config(config)
        .build()?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut chart, tree.node_count());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    chart: &mut Chart<'_>,
    node_count: usize,
) -> Result<()> {
    let mut content = Rect::default();
    let mut drag_from: Option<(u16, u16)> = None;
    let mut details = Details::default();

    loop {
        let mut drawn = Ok(());
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Paragraph::new(format!(
                " hchart | {node_count} nodes | arrows pan | +/- zoom | 0 reset | click select | q quit "
            ))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            content = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
            let size = Size::new(f64::from(content.width), f64::from(content.height));
            let mut surface = TermSurface::new(frame.buffer_mut(), content);
            drawn = chart.draw(&mut surface, size);

            let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            let status = Paragraph::new(status_line(chart, &details))
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(status, status_area);
        })?;
        drawn?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let nav = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => NavKey::Left,
                    KeyCode::Right => NavKey::Right,
                    KeyCode::Up => NavKey::Up,
                    KeyCode::Down => NavKey::Down,
                    KeyCode::Char('+' | '=') => NavKey::ZoomIn,
                    KeyCode::Char('-') => NavKey::ZoomOut,
                    KeyCode::Char('0') => NavKey::Reset,
                    _ => continue,
                };
                chart.handle_key(nav);
            }
            Event::Mouse(mouse) => on_mouse(chart, mouse, content, &mut drag_from),
            _ => {}
        }

        let events = chart.drain_events();
        details.refresh(chart, &events);
    }
    Ok(())
}

fn on_mouse(
    chart: &mut Chart<'_>,
    mouse: MouseEvent,
    content: Rect,
    drag_from: &mut Option<(u16, u16)>,
) {
    // Cell centers, relative to the chart area.
    let point = Point::new(
        f64::from(mouse.column) - f64::from(content.x) + 0.5,
        f64::from(mouse.row) - f64::from(content.y) + 0.5,
    );
    let zoom = mouse.modifiers.contains(KeyModifiers::CONTROL);

    match mouse.kind {
        MouseEventKind::Moved => {
            chart.set_focus_at(point);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            chart.select_at(point);
            *drag_from = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((col, row)) = drag_from.replace((mouse.column, mouse.row)) {
                chart.drag(
                    f64::from(mouse.column) - f64::from(col),
                    f64::from(mouse.row) - f64::from(row),
                );
            }
        }
        MouseEventKind::Up(_) => *drag_from = None,
        MouseEventKind::ScrollDown if zoom => {
            chart.zoom_at(point.x, 1.0);
        }
        MouseEventKind::ScrollUp if zoom => {
            chart.zoom_at(point.x, -1.0);
        }
        MouseEventKind::ScrollDown => {
            chart.pan_y_pixels(3.0);
        }
        MouseEventKind::ScrollUp => {
            chart.pan_y_pixels(-3.0);
        }
        MouseEventKind::ScrollLeft => {
            chart.pan_x_pixels(-4.0);
        }
        MouseEventKind::ScrollRight => {
            chart.pan_x_pixels(4.0);
        }
        _ => {}
    }
}

fn describe(node: &IntervalNode<FramePayload>) -> String {
    let payload = node.data();
    let name = payload.name().qualified(payload.separator());
    match payload {
        FramePayload::Usage { usage, .. } => {
            format!("{name} ({} units, {:.0}% usage)", node.duration(), usage * 100.0)
        }
        FramePayload::Managed(_) | FramePayload::Native(_) => {
            format!("{name} ({} units)", node.duration())
        }
    }
}

/// Descriptions of the focused and selected nodes, rebuilt only when the
/// chart reports a change.
#[derive(Debug, Default)]
struct Details {
    focused: Option<String>,
    selected: Option<String>,
}

impl Details {
    fn refresh(&mut self, chart: &Chart<'_>, events: &[ChartEvent]) {
        for event in events {
            match event {
                ChartEvent::FocusChanged => {
                    self.focused = chart.focused_node().map(describe);
                }
                ChartEvent::SelectionChanged => {
                    self.selected = chart.selected_node().map(describe);
                }
                ChartEvent::RootChanged => {
                    self.focused = chart.focused_node().map(describe);
                    self.selected = chart.selected_node().map(describe);
                }
            }
        }
    }
}

fn status_line(chart: &Chart<'_>, details: &Details) -> String {
    let visible = chart.viewport().visible();
    let mut line = format!(
        " [{:.0}, {:.0}] | scroll {:.0}/{}",
        visible.min(),
        visible.max(),
        chart.viewport().y_offset(),
        chart.maximum_height(),
    );
    if let Some(focused) = &details.focused {
        line.push_str(" | ");
        line.push_str(focused);
    }
    if let Some(selected) = &details.selected {
        line.push_str(" | selected: ");
        line.push_str(selected);
    }
    line
}
