//! In-memory CRUD store bound as `db` in handler scopes.
//!
//! Collections spring into existence on first use and live for the
//! process lifetime. Inserted objects get an auto-incremented numeric
//! `id` field. The store is unsynchronized: the core runs handlers one
//! at a time, so there is never a second writer.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use rulang_eval::{Flow, NativeFn, Value};
use rulang_util::RuntimeError;

struct Collection {
    next_id: u64,
    rows: IndexMap<u64, Value>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: IndexMap::new(),
        }
    }
}

/// Process-local collection-keyed store.
#[derive(Default)]
pub struct Store {
    collections: RefCell<IndexMap<String, Collection>>,
}

impl Store {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Inserts `value` into `collection`, stamping object values with an
    /// auto-incremented `id`. Returns the stored value.
    pub fn insert(&self, collection: &str, value: Value) -> Value {
        let mut collections = self.collections.borrow_mut();
        let collection = collections
            .entry(collection.to_string())
            .or_default();

        let id = collection.next_id;
        collection.next_id += 1;

        if let Value::Object(entries) = &value {
            entries
                .borrow_mut()
                .insert("id".to_string(), Value::Number(id as f64));
        }

        collection.rows.insert(id, value.clone());
        value
    }

    /// All values in `collection`, in insertion order.
    pub fn all(&self, collection: &str) -> Vec<Value> {
        self.collections
            .borrow()
            .get(collection)
            .map(|c| c.rows.values().cloned().collect())
            .unwrap_or_default()
    }

    /// The value stored under `id`, if any.
    pub fn get(&self, collection: &str, id: u64) -> Option<Value> {
        self.collections
            .borrow()
            .get(collection)
            .and_then(|c| c.rows.get(&id).cloned())
    }

    /// Replaces the value under `id`. Returns the new value, or `None`
    /// when the id does not exist.
    pub fn update(&self, collection: &str, id: u64, value: Value) -> Option<Value> {
        let mut collections = self.collections.borrow_mut();
        let collection = collections.get_mut(collection)?;
        if !collection.rows.contains_key(&id) {
            return None;
        }

        if let Value::Object(entries) = &value {
            entries
                .borrow_mut()
                .insert("id".to_string(), Value::Number(id as f64));
        }

        collection.rows.insert(id, value.clone());
        Some(value)
    }

    /// Removes the value under `id`. Returns whether anything was removed.
    pub fn remove(&self, collection: &str, id: u64) -> bool {
        self.collections
            .borrow_mut()
            .get_mut(collection)
            .map(|c| c.rows.shift_remove(&id).is_some())
            .unwrap_or(false)
    }

    /// Builds the `db` value handlers see: an object of natives over this
    /// store.
    pub fn value(self: &Rc<Self>) -> Value {
        Value::object(vec![
            ("insert".to_string(), self.insert_native()),
            ("all".to_string(), self.all_native()),
            ("get".to_string(), self.get_native()),
            ("update".to_string(), self.update_native()),
            ("remove".to_string(), self.remove_native()),
        ])
    }

    fn insert_native(self: &Rc<Self>) -> Value {
        let store = self.clone();
        Value::Native(NativeFn::new("db.insert", move |args| {
            let (collection, value) = match args {
                [Value::String(collection), value] => (collection, value.clone()),
                _ => return Err(arg_error("insert expects (collection, value)")),
            };
            Ok(store.insert(collection, value))
        }))
    }

    fn all_native(self: &Rc<Self>) -> Value {
        let store = self.clone();
        Value::Native(NativeFn::new("db.all", move |args| {
            let collection = match args {
                [Value::String(collection)] => collection,
                _ => return Err(arg_error("all expects (collection)")),
            };
            Ok(Value::array(store.all(collection)))
        }))
    }

    fn get_native(self: &Rc<Self>) -> Value {
        let store = self.clone();
        Value::Native(NativeFn::new("db.get", move |args| {
            let (collection, id) = expect_collection_and_id(args, "get")?;
            Ok(store.get(collection, id).unwrap_or(Value::Null))
        }))
    }

    fn update_native(self: &Rc<Self>) -> Value {
        let store = self.clone();
        Value::Native(NativeFn::new("db.update", move |args| {
            let (collection, id, value) = match args {
                [Value::String(collection), id, value] => match parse_id(id) {
                    Some(id) => (collection, id, value.clone()),
                    None => return Err(arg_error("update expects a numeric id")),
                },
                _ => return Err(arg_error("update expects (collection, id, value)")),
            };
            Ok(store.update(collection, id, value).unwrap_or(Value::Null))
        }))
    }

    fn remove_native(self: &Rc<Self>) -> Value {
        let store = self.clone();
        Value::Native(NativeFn::new("db.remove", move |args| {
            let (collection, id) = expect_collection_and_id(args, "remove")?;
            Ok(Value::Bool(store.remove(collection, id)))
        }))
    }
}

/// Route parameters arrive as strings, so ids are accepted both as
/// numbers and as numeric strings.
fn expect_collection_and_id<'a>(args: &'a [Value], op: &str) -> Result<(&'a str, u64), Flow> {
    match args {
        [Value::String(collection), id] => match parse_id(id) {
            Some(id) => Ok((collection.as_str(), id)),
            None => Err(arg_error(&format!("{} expects a numeric id", op))),
        },
        _ => Err(arg_error(&format!("{} expects (collection, id)", op))),
    }
}

fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(id) => Some(*id as u64),
        Value::String(id) => id.parse().ok(),
        _ => None,
    }
}

fn arg_error(message: &str) -> Flow {
    RuntimeError::type_error(message).into()
}
