#![allow(dead_code)]

use catalogo_cli::api::ProductApi;
use catalogo_cli::client::{ListView, Notice, View};
use catalogo_cli::error::{CatalogError, Result};
use catalogo_cli::model::{Product, ProductPayload};
use catalogo_cli::state::FormView;
use reqwest::StatusCode;
use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(i64),
    Create(ProductPayload),
    Update(i64, ProductPayload),
    Delete(i64),
}

/// In-memory stand-in for the product endpoint that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub products: RefCell<Vec<Product>>,
    pub calls: RefCell<Vec<Call>>,
    failing: RefCell<HashSet<&'static str>>,
}

impl FakeApi {
    pub fn with(products: Vec<Product>) -> Self {
        FakeApi {
            products: RefCell::new(products),
            ..Default::default()
        }
    }

    /// Make one operation ("list", "get", "create", "update", "delete")
    /// answer with a 500.
    pub fn fail(&self, op: &'static str) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self, op: &'static str) -> Result<()> {
        if self.failing.borrow().contains(op) {
            return Err(CatalogError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

impl ProductApi for FakeApi {
    fn list(&self) -> Result<Vec<Product>> {
        self.calls.borrow_mut().push(Call::List);
        self.check("list")?;
        Ok(self.products.borrow().clone())
    }

    fn get(&self, id: i64) -> Result<Product> {
        self.calls.borrow_mut().push(Call::Get(id));
        self.check("get")?;
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::Status {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })
    }

    fn create(&self, payload: &ProductPayload) -> Result<Product> {
        self.calls.borrow_mut().push(Call::Create(payload.clone()));
        self.check("create")?;
        let mut products = self.products.borrow_mut();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: payload.name.clone(),
            price: payload.price,
        };
        products.push(product.clone());
        Ok(product)
    }

    fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product> {
        self.calls.borrow_mut().push(Call::Update(id, payload.clone()));
        self.check("update")?;
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::Status {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })?;
        product.name = payload.name.clone();
        product.price = payload.price;
        Ok(product.clone())
    }

    fn delete(&self, id: i64) -> Result<()> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.check("delete")?;
        self.products.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Loading(bool),
    List(ListView),
    Form(FormView),
    Confirm(String),
    HideConfirm,
    Alert(Notice),
}

/// `View` that just remembers what it was asked to show.
#[derive(Default)]
pub struct RecordingView {
    pub seen: Vec<Seen>,
}

impl RecordingView {
    pub fn last_list(&self) -> Option<&ListView> {
        self.seen.iter().rev().find_map(|s| match s {
            Seen::List(list) => Some(list),
            _ => None,
        })
    }

    pub fn last_form(&self) -> Option<&FormView> {
        self.seen.iter().rev().find_map(|s| match s {
            Seen::Form(form) => Some(form),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<Notice> {
        self.seen
            .iter()
            .filter_map(|s| match s {
                Seen::Alert(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl View for RecordingView {
    fn set_loading(&mut self, on: bool) {
        self.seen.push(Seen::Loading(on));
    }

    fn show_list(&mut self, list: &ListView) {
        self.seen.push(Seen::List(list.clone()));
    }

    fn show_form(&mut self, form: &FormView) {
        self.seen.push(Seen::Form(form.clone()));
    }

    fn show_confirm(&mut self, message: &str) {
        self.seen.push(Seen::Confirm(message.to_string()));
    }

    fn hide_confirm(&mut self) {
        self.seen.push(Seen::HideConfirm);
    }

    fn alert(&mut self, notice: Notice) {
        self.seen.push(Seen::Alert(notice));
    }
}

pub fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
    }
}

pub fn fruit_basket() -> Vec<Product> {
    vec![product(1, "Abacaxi", 7.5), product(2, "Banana", 3.0)]
}
