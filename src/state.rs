// View state owned by the catalog view-model. Nothing here does I/O.

use crate::model::ProductForm;

/// Which way a submit goes. Carrying the id inside `Edit` means there is
/// no separate "hidden id" to get out of sync with the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        id: i64,
    },
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            FormMode::Edit { id } => Some(*id),
            FormMode::Create => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "New Product",
            FormMode::Edit { .. } => "Edit Product",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Product",
            FormMode::Edit { .. } => "Update Product",
        }
    }

    pub fn cancel_visible(&self) -> bool {
        self.is_editing()
    }
}

/// A deletion waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub name: String,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub mode: FormMode,
    pub form: ProductForm,
    /// Some only while the confirmation dialog is open.
    pub pending_delete: Option<PendingDelete>,
    pub search_term: String,
    pub loading: bool,
}

impl ViewState {
    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    /// Back to an empty create form.
    pub fn reset_form(&mut self) {
        self.form.clear();
        self.mode = FormMode::Create;
    }

    /// Snapshot handed to the view when the form changes.
    pub fn form_view(&self) -> FormView {
        FormView {
            mode: self.mode,
            form: self.form.clone(),
        }
    }
}

/// What the UI needs to draw the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub mode: FormMode,
    pub form: ProductForm,
}

impl FormView {
    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    pub fn cancel_visible(&self) -> bool {
        self.mode.cancel_visible()
    }

    /// Hidden id field; empty in create-mode.
    pub fn id_field(&self) -> String {
        self.mode
            .editing_id()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }
}
