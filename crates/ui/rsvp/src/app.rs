use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use form::{FormIntent, FormProfile, RegistrationFormModel, SubmitOutcome};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{
        Component, confirmation::ConfirmationDialog, form_panel::FormPanel, summary::SummaryPanel,
    },
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse, Frame, Tui},
};

pub struct App {
    pub model: RegistrationFormModel,
    pub form: FormPanel,
    pub summary: SummaryPanel,
    pub confirmation: ConfirmationDialog,
    pub theme: Theme,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub should_quit: bool,
    pub should_suspend: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(profile: FormProfile, theme: Theme, tick_rate: f64, frame_rate: f64) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            model: RegistrationFormModel::new(profile),
            form: FormPanel::new(theme.clone()),
            summary: SummaryPanel::new(theme.clone()),
            confirmation: ConfirmationDialog::new(theme.clone()),
            theme,
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            action_tx,
            action_rx,
        }
    }

    pub fn model(&self) -> &RegistrationFormModel {
        &self.model
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .paste(true);
        tui.enter()?;
        info!(variant = %self.model.profile().variant, "form session started");

        loop {
            if let Some(event) = tui.next_event().await {
                self.handle_event(event)?;
            }
            self.handle_actions(&mut tui)?;

            if self.should_suspend {
                tui.suspend()?;
                self.action_tx.send(Action::Resume)?;
                self.action_tx.send(Action::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("form session ended");
        Ok(())
    }

    /// Turn one terminal event into actions on the queue.
    ///
    /// Ctrl+C and Ctrl+Z always win. Otherwise the modal gets the event while
    /// it is open, the form panel when it is not; whatever they leave
    /// unconsumed falls through to the app-level keys.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = &event {
            if let Some(action) = Self::global_key(key) {
                self.action_tx.send(action)?;
                return Ok(());
            }
        }

        let handler: &mut dyn Component = if self.model.is_submit_confirmed() {
            &mut self.confirmation
        } else {
            &mut self.form
        };
        let stop_event_propagation = match handler.handle_events(&event, &self.model)? {
            Some(EventResponse::Continue(action)) => {
                self.action_tx.send(action)?;
                false
            }
            Some(EventResponse::Stop(action)) => {
                self.action_tx.send(action)?;
                true
            }
            None => false,
        };
        if stop_event_propagation {
            return Ok(());
        }

        match event {
            Event::Quit => self.action_tx.send(Action::Quit)?,
            Event::Tick => self.action_tx.send(Action::Tick)?,
            Event::Render => self.action_tx.send(Action::Render)?,
            Event::Resize(x, y) => self.action_tx.send(Action::Resize(x, y))?,
            Event::Error => self
                .action_tx
                .send(Action::Error("terminal event stream failed".into()))?,
            Event::Key(key) if key.code == KeyCode::Esc => self.action_tx.send(Action::Quit)?,
            _ => {}
        }
        Ok(())
    }

    fn global_key(key: &KeyEvent) -> Option<Action> {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('z') => Some(Action::Suspend),
            _ => None,
        }
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match action {
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => {
                    tui.resize(Rect::new(0, 0, w, h))?;
                    self.render(tui)?;
                }
                Action::Render => self.render(tui)?,
                other => self.update(other)?,
            }
        }
        Ok(())
    }

    /// Apply a non-terminal action: lifecycle flags, then the model, then
    /// every component in turn.
    pub fn update(&mut self, action: Action) -> Result<()> {
        match &action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Error(message) => error!("{message}"),
            _ => {}
        }

        if let Some(intent) = action.as_intent() {
            if intent == FormIntent::Submit && !self.model.submit_enabled() {
                debug!("submit ignored while the form is invalid");
            } else {
                match self.model.dispatch(intent) {
                    Some(SubmitOutcome::Rejected(errors)) => {
                        let fields: Vec<_> = errors.fields().collect();
                        debug!(?fields, "form has errors");
                    }
                    Some(SubmitOutcome::AlreadyConfirmed) => debug!("already confirmed"),
                    Some(SubmitOutcome::Confirmed(_)) | None => {}
                }
            }
        }

        let components: [&mut dyn Component; 3] =
            [&mut self.form, &mut self.summary, &mut self.confirmation];
        for component in components {
            if let Some(follow_up) = component.update(&action, &self.model)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        tui.draw(|f| {
            if let Err(err) = self.draw(f) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {err:?}")));
            }
        })?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let area = frame.area();
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);

        let title = self.model.profile().copy.page_title;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(title, self.theme.style(UiGroup::Title))))
                .alignment(Alignment::Center),
            header,
        );

        self.form.draw(frame, left, &self.model)?;
        self.summary.draw(frame, right, &self.model)?;
        self.confirmation.draw(frame, area, &self.model)?;
        Ok(())
    }
}
