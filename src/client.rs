// Catalog view-model. Owns the view state, talks to the API through the
// `ProductApi` trait and reports everything visible through the `View`
// trait, so it has no idea whether it is drawing to a terminal or a test.

use crate::api::ProductApi;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::model::{filter_by_name, Product, ProductForm};
use crate::state::{FormMode, FormView, PendingDelete, ViewState};
use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

/// What the list area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Items(Vec<Product>),
    /// Nothing to show. `searching` picks the hint: refine the search, or
    /// create the first product.
    Empty { searching: bool },
    /// The list could not be fetched.
    Unavailable,
}

impl ListView {
    fn from_products(products: Vec<Product>, searching: bool) -> Self {
        if products.is_empty() {
            ListView::Empty { searching }
        } else {
            ListView::Items(products)
        }
    }
}

/// A blocking user-facing message, the terminal stand-in for `alert()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Presentation callbacks. The UI adapter implements this; the view-model
/// only ever calls it.
pub trait View {
    fn set_loading(&mut self, on: bool);
    fn show_list(&mut self, list: &ListView);
    fn show_form(&mut self, form: &FormView);
    fn show_confirm(&mut self, message: &str);
    fn hide_confirm(&mut self);
    fn alert(&mut self, notice: Notice);
}

/// Handle for one list fetch. `term` is `None` for the plain listing and
/// `Some` for a filtered search. Only the most recently issued ticket may
/// render its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub term: Option<String>,
}

/// User intents, built by the UI adapter and fed to
/// [`CatalogClient::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Submit(ProductForm),
    BeginEdit(i64),
    CancelEdit,
    RequestDelete { id: i64, name: String },
    ConfirmDelete,
    DeclineDelete,
    SearchInput(String),
    Tick(Instant),
}

pub struct CatalogClient<A> {
    api: A,
    state: ViewState,
    debouncer: Debouncer,
    issued: u64,
    shown: Vec<Product>,
}

impl<A: ProductApi> CatalogClient<A> {
    pub fn new(api: A, debounce: Duration) -> Self {
        CatalogClient {
            api,
            state: ViewState::default(),
            debouncer: Debouncer::new(debounce),
            issued: 0,
            shown: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Products currently rendered in the list (empty after a failure).
    pub fn shown(&self) -> &[Product] {
        &self.shown
    }

    pub fn dispatch<V: View>(&mut self, command: Command, view: &mut V) {
        debug!("dispatch {:?}", command);
        match command {
            Command::Refresh => self.load_all(view),
            Command::Submit(form) => self.save(form, view),
            Command::BeginEdit(id) => self.begin_edit(id, view),
            Command::CancelEdit => self.cancel_edit(view),
            Command::RequestDelete { id, name } => self.request_delete(id, name, view),
            Command::ConfirmDelete => self.confirm_delete(view),
            Command::DeclineDelete => self.decline_delete(view),
            Command::SearchInput(term) => self.search_input(term, Instant::now()),
            Command::Tick(now) => self.tick(now, view),
        }
    }

    /// Fetch the whole collection and render it, or the error placeholder.
    pub fn load_all<V: View>(&mut self, view: &mut V) {
        let ticket = self.begin_fetch(None, view);
        let result = self.api.list();
        self.finish_search(ticket, result, view);
    }

    /// Create or update depending on the mode. On success the form is
    /// cleared and the list reloaded.
    pub fn save<V: View>(&mut self, form: ProductForm, view: &mut V) {
        self.state.form = form;
        let payload = match self.state.form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("rejected form: {}", e);
                view.alert(Notice::Failure(format!("Please check the form: {}", e)));
                return;
            }
        };

        let mode = self.state.mode;
        let result = match mode {
            FormMode::Create => self.api.create(&payload),
            FormMode::Edit { id } => self.api.update(id, &payload),
        };

        match result {
            Ok(saved) => {
                info!("saved product {:?}", saved);
                self.reset_form(view);
                self.load_all(view);
                let verb = if mode.is_editing() { "updated" } else { "created" };
                view.alert(Notice::Success(format!("Product {} successfully!", verb)));
            }
            Err(e) => {
                error!("failed to save product: {}", e);
                view.alert(Notice::Failure(
                    "Could not save the product. See the log for details.".into(),
                ));
            }
        }
    }

    /// Load one record into the form and switch to edit-mode. On failure
    /// the current form and mode stay as they were.
    pub fn begin_edit<V: View>(&mut self, id: i64, view: &mut V) {
        match self.api.get(id) {
            Ok(product) => {
                self.state.form = ProductForm::from_product(&product);
                self.state.mode = FormMode::Edit { id: product.id };
                view.show_form(&self.state.form_view());
            }
            Err(e) => {
                error!("failed to load product {} for editing: {}", id, e);
                view.alert(Notice::Failure(
                    "Could not load the product for editing.".into(),
                ));
            }
        }
    }

    pub fn cancel_edit<V: View>(&mut self, view: &mut V) {
        self.reset_form(view);
    }

    pub fn reset_form<V: View>(&mut self, view: &mut V) {
        self.state.reset_form();
        view.show_form(&self.state.form_view());
    }

    /// Open the confirmation dialog for `id`.
    pub fn request_delete<V: View>(&mut self, id: i64, name: String, view: &mut V) {
        let pending = PendingDelete { id, name };
        view.show_confirm(&pending.message());
        self.state.pending_delete = Some(pending);
    }

    /// Delete the pending product, if any, and close the dialog.
    pub fn confirm_delete<V: View>(&mut self, view: &mut V) {
        let Some(pending) = self.state.pending_delete.take() else {
            return;
        };
        view.hide_confirm();

        match self.api.delete(pending.id) {
            Ok(()) => {
                info!("deleted product {}", pending.id);
                self.load_all(view);
                view.alert(Notice::Success("Product deleted successfully!".into()));
            }
            Err(e) => {
                error!("failed to delete product {}: {}", pending.id, e);
                view.alert(Notice::Failure(
                    "Could not delete the product. See the log for details.".into(),
                ));
            }
        }
    }

    pub fn decline_delete<V: View>(&mut self, view: &mut V) {
        self.state.pending_delete = None;
        view.hide_confirm();
    }

    /// Record a keystroke: store the term and re-arm the debounce timer.
    pub fn search_input(&mut self, term: String, now: Instant) {
        self.state.search_term = term;
        self.debouncer.schedule(now);
    }

    /// Run the pending search if its delay has elapsed.
    pub fn tick<V: View>(&mut self, now: Instant, view: &mut V) {
        if let Some(ticket) = self.poll_search(now, view) {
            let result = self.api.list();
            self.finish_search(ticket, result, view);
        }
    }

    /// Non-blocking half of [`tick`](Self::tick): when the timer fires,
    /// issue a ticket and leave the fetch to the caller, who hands the
    /// result to [`finish_search`](Self::finish_search).
    pub fn poll_search<V: View>(&mut self, now: Instant, view: &mut V) -> Option<SearchTicket> {
        if !self.debouncer.fire(now) {
            return None;
        }
        let term = self.state.search_term.clone();
        Some(self.begin_fetch(Some(term), view))
    }

    /// Fetch and filter right away, skipping the debounce.
    pub fn search<V: View>(&mut self, term: &str, view: &mut V) {
        self.debouncer.cancel();
        self.state.search_term = term.to_string();
        let ticket = self.begin_fetch(Some(term.to_string()), view);
        let result = self.api.list();
        self.finish_search(ticket, result, view);
    }

    /// Drop any pending or in-flight search: the timer is disarmed and
    /// outstanding tickets become stale.
    pub fn cancel_search<V: View>(&mut self, view: &mut V) {
        self.debouncer.cancel();
        if self.state.loading {
            self.issued += 1;
            self.state.loading = false;
            view.set_loading(false);
        }
    }

    fn begin_fetch<V: View>(&mut self, term: Option<String>, view: &mut V) -> SearchTicket {
        self.issued += 1;
        self.state.loading = true;
        view.set_loading(true);
        SearchTicket {
            seq: self.issued,
            term,
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Apply a fetch result. Results for anything but the latest ticket
    /// are dropped; returns whether this one was applied.
    pub fn finish_search<V: View>(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Product>>,
        view: &mut V,
    ) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "dropping stale result for ticket {} (latest is {})",
                ticket.seq, self.issued
            );
            return false;
        }

        let searching = !self.state.search_term.is_empty();
        match (result, ticket.term) {
            (Ok(products), None) => {
                let list = ListView::from_products(products.clone(), searching);
                self.shown = products;
                view.show_list(&list);
            }
            (Ok(products), Some(term)) => {
                let filtered = filter_by_name(products, &term);
                let list = ListView::from_products(filtered.clone(), searching);
                self.shown = filtered;
                view.show_list(&list);
            }
            (Err(e), None) => {
                error!("failed to load products: {}", e);
                self.shown.clear();
                view.show_list(&ListView::Unavailable);
            }
            (Err(e), Some(term)) => {
                error!("failed to search products for '{}': {}", term, e);
                view.alert(Notice::Failure("Could not search products.".into()));
            }
        }

        self.state.loading = false;
        view.set_loading(false);
        true
    }
}
