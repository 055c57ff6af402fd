// UI layer: the terminal adapter. Menus come from `dialoguer`, the loading
// indicator is an `indicatif` spinner and the live search reads raw key
// events with `crossterm`. Every action is turned into a `Command` and
// handed to the view-model; nothing here talks HTTP directly, except that
// live search runs the list fetch on a worker thread.

use crate::api::ProductApi;
use crate::client::{CatalogClient, Command, ListView, Notice, SearchTicket, View};
use crate::error::Result as CatalogResult;
use crate::model::{Product, ProductForm};
use crate::state::FormView;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on how long the live search blocks waiting for a key, so
/// worker results get drained even while the user is idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Print a line that also looks right while the terminal is in raw mode.
fn line(text: &str) {
    let mut out = io::stdout();
    let _ = write!(out, "{}\r\n", text);
    let _ = out.flush();
}

/// `View` implementation that draws to the terminal.
pub struct TerminalView {
    base_url: String,
    spinner: Option<ProgressBar>,
    form: FormView,
    confirm: Option<String>,
    /// Set during live search, where a spinner would fight the prompt line.
    live: bool,
}

impl TerminalView {
    pub fn new(base_url: &str, form: FormView) -> Self {
        TerminalView {
            base_url: base_url.to_string(),
            spinner: None,
            form,
            confirm: None,
            live: false,
        }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn confirm_message(&self) -> Option<&str> {
        self.confirm.as_deref()
    }
}

impl View for TerminalView {
    fn set_loading(&mut self, on: bool) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        if on && !self.live {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Loading products...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        }
    }

    fn show_list(&mut self, list: &ListView) {
        match list {
            ListView::Items(products) => {
                for product in products {
                    line(&product.to_string());
                }
            }
            ListView::Empty { searching } => {
                line("No products found.");
                if *searching {
                    line("Try searching with other terms.");
                } else {
                    line("Create the first product using the form.");
                }
            }
            ListView::Unavailable => {
                line("Could not load products.");
                line(&format!("Check that the server is running at {}", self.base_url));
            }
        }
    }

    fn show_form(&mut self, form: &FormView) {
        self.form = form.clone();
    }

    fn show_confirm(&mut self, message: &str) {
        self.confirm = Some(message.to_string());
    }

    fn hide_confirm(&mut self) {
        self.confirm = None;
    }

    fn alert(&mut self, notice: Notice) {
        match notice {
            Notice::Success(text) => line(&text),
            Notice::Failure(text) => line(&format!("Error: {}", text)),
        }
    }
}

/// Main interactive menu. Loads the list once, then loops until "Exit".
pub fn main_menu<A>(mut client: CatalogClient<A>, base_url: &str) -> Result<()>
where
    A: ProductApi + Clone + Send + 'static,
{
    let mut view = TerminalView::new(base_url, client.state().form_view());
    client.dispatch(Command::Refresh, &mut view);

    loop {
        let items = vec![
            "List products",
            "New product",
            "Edit product",
            "Delete product",
            "Search",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => client.dispatch(Command::Refresh, &mut view),
            1 => {
                if client.state().is_editing() {
                    client.dispatch(Command::CancelEdit, &mut view);
                }
                handle_form(&mut client, &mut view)?;
            }
            2 => {
                if let Some(product) = pick_product(client.shown(), "Product to edit")? {
                    client.dispatch(Command::BeginEdit(product.id), &mut view);
                    if client.state().is_editing() {
                        handle_form(&mut client, &mut view)?;
                    }
                }
            }
            3 => handle_delete(&mut client, &mut view)?,
            4 => live_search(&mut client, &mut view)?,
            5 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Prompt the form fields (prefilled from the current form) and submit or
/// cancel.
fn handle_form<A: ProductApi>(client: &mut CatalogClient<A>, view: &mut TerminalView) -> Result<()> {
    let current = view.form().clone();
    line(&format!("== {} ==", current.title()));
    if current.cancel_visible() {
        line(&format!("id: {}", current.id_field()));
    }

    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(current.form.name.clone())
        .allow_empty(true)
        .interact_text()?;
    let price: String = Input::new()
        .with_prompt("Price")
        .with_initial_text(current.form.price.clone())
        .allow_empty(true)
        .interact_text()?;

    let actions = vec![current.submit_label(), "Cancel"];
    let choice = Select::new().items(&actions).default(0).interact()?;
    if choice == 0 {
        client.dispatch(Command::Submit(ProductForm { name, price }), view);
    } else {
        client.dispatch(Command::CancelEdit, view);
    }
    Ok(())
}

/// Pick a product, then ask for confirmation before deleting it.
fn handle_delete<A: ProductApi>(client: &mut CatalogClient<A>, view: &mut TerminalView) -> Result<()> {
    let Some(product) = pick_product(client.shown(), "Product to delete")? else {
        return Ok(());
    };
    client.dispatch(
        Command::RequestDelete {
            id: product.id,
            name: product.name.clone(),
        },
        view,
    );

    let message = view.confirm_message().unwrap_or("Delete this product?").to_string();
    let yes = Confirm::new().with_prompt(message).default(false).interact()?;
    let command = if yes {
        Command::ConfirmDelete
    } else {
        Command::DeclineDelete
    };
    client.dispatch(command, view);
    Ok(())
}

fn pick_product(products: &[Product], prompt: &str) -> Result<Option<Product>> {
    if products.is_empty() {
        line("No products listed. Refresh the list first.");
        return Ok(None);
    }
    let labels: Vec<String> = products.iter().map(|p| p.to_string()).collect();
    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(picked.map(|i| products[i].clone()))
}

type SearchResult = (SearchTicket, CatalogResult<Vec<Product>>);

/// Restores cooked mode when dropped, even on an early `?` return.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, PartialEq)]
enum SearchExit {
    Submit,
    Abort,
}

/// Search-as-you-type. Keystrokes re-arm the debounce timer; when it fires
/// the fetch runs on a worker thread and its result comes back through a
/// channel, where stale tickets are discarded by the view-model.
fn live_search<A>(client: &mut CatalogClient<A>, view: &mut TerminalView) -> Result<()>
where
    A: ProductApi + Clone + Send + 'static,
{
    line("Type to search, Enter to search now, Esc to leave.");
    let (tx, rx) = mpsc::channel::<SearchResult>();
    let mut term = client.state().search_term.clone();

    view.live = true;
    let exit = {
        let _raw = RawMode::enable()?;
        search_loop(client, view, &mut term, &tx, &rx)
    };
    view.live = false;

    match exit? {
        SearchExit::Submit => client.search(&term, view),
        SearchExit::Abort => client.cancel_search(view),
    }
    Ok(())
}

fn search_loop<A>(
    client: &mut CatalogClient<A>,
    view: &mut TerminalView,
    term: &mut String,
    tx: &Sender<SearchResult>,
    rx: &Receiver<SearchResult>,
) -> Result<SearchExit>
where
    A: ProductApi + Clone + Send + 'static,
{
    draw_prompt(term)?;
    loop {
        let mut redraw = false;
        while let Ok((ticket, result)) = rx.try_recv() {
            if client.is_current(&ticket) {
                line("");
            }
            redraw |= client.finish_search(ticket, result, view);
        }

        if let Some(ticket) = client.poll_search(Instant::now(), view) {
            let api = client.api().clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let result = api.list();
                let _ = tx.send((ticket, result));
            });
        }

        if redraw {
            draw_prompt(term)?;
        }

        let wait = client
            .debouncer()
            .remaining(Instant::now())
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));
        if !event::poll(wait)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key_action(&key) {
            KeyAction::Exit(exit) => {
                line("");
                return Ok(exit);
            }
            KeyAction::Push(c) => term.push(c),
            KeyAction::Pop => {
                if term.pop().is_none() {
                    continue;
                }
            }
            KeyAction::Ignore => continue,
        }
        client.dispatch(Command::SearchInput(term.clone()), view);
        draw_prompt(term)?;
    }
}

#[derive(Debug, PartialEq)]
enum KeyAction {
    Exit(SearchExit),
    Push(char),
    Pop,
    Ignore,
}

fn key_action(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => KeyAction::Exit(SearchExit::Submit),
        KeyCode::Esc => KeyAction::Exit(SearchExit::Abort),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Exit(SearchExit::Abort)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Push(c),
        KeyCode::Backspace => KeyAction::Pop,
        _ => KeyAction::Ignore,
    }
}

fn draw_prompt(term: &str) -> io::Result<()> {
    let mut out = io::stdout();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    write!(out, "Search: {}", term)?;
    out.flush()
}
