use super::backend::StorageBackend;
use super::{CollectionData, DataStore};
use crate::error::{Result, TodoError};
use crate::todo::{Todo, TodoId, TodoPatch, TodoQuery};
use tracing::debug;

/// A named todo collection persisted through a [`StorageBackend`].
pub struct LocalStore<B: StorageBackend> {
    backend: B,
    name: String,
    next_id: TodoId,
}

impl<B: StorageBackend> LocalStore<B> {
    /// Opens (creating if needed) the collection stored under `name`.
    ///
    /// A missing entry is initialized to an empty collection. For an existing
    /// non-empty one the id counter resumes after the highest stored id.
    pub fn open(backend: B, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut store = Self {
            backend,
            name,
            next_id: 0,
        };

        match store.backend.get_item(&store.name)? {
            None => {
                store.persist(&CollectionData::default())?;
                debug!(collection = %store.name, "created empty collection");
            }
            Some(raw) => {
                let data = parse(&raw)?;
                if let Some(max) = data.todos.iter().map(|t| t.id).max() {
                    store.next_id = id_after(max)?;
                }
                debug!(
                    collection = %store.name,
                    todos = data.todos.len(),
                    next_id = store.next_id,
                    "opened collection"
                );
            }
        }

        Ok(store)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id the next inserted record will receive.
    pub fn next_id(&self) -> TodoId {
        self.next_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self) -> Result<CollectionData> {
        match self.backend.get_item(&self.name)? {
            Some(raw) => parse(&raw),
            None => Ok(CollectionData::default()),
        }
    }

    fn persist(&self, data: &CollectionData) -> Result<()> {
        let raw = serde_json::to_string_pretty(data).map_err(TodoError::Serialization)?;
        self.backend.set_item(&self.name, &raw)
    }
}

fn parse(raw: &str) -> Result<CollectionData> {
    serde_json::from_str(raw).map_err(TodoError::Serialization)
}

fn id_after(id: TodoId) -> Result<TodoId> {
    id.checked_add(1)
        .ok_or_else(|| TodoError::Store("id space exhausted".to_string()))
}

impl<B: StorageBackend> DataStore for LocalStore<B> {
    fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>> {
        let data = self.load()?;
        Ok(data
            .todos
            .into_iter()
            .filter(|todo| query.matches(todo))
            .collect())
    }

    fn find_all(&self) -> Result<Vec<Todo>> {
        Ok(self.load()?.todos)
    }

    fn save(&mut self, fields: TodoPatch, id: Option<TodoId>) -> Result<Vec<Todo>> {
        let mut data = self.load()?;

        match id {
            Some(id) => {
                match data.todos.iter_mut().find(|t| t.id == id) {
                    Some(todo) => {
                        fields.apply_to(todo);
                        debug!(collection = %self.name, id, "updated todo");
                    }
                    None => debug!(collection = %self.name, id, "update skipped, no such todo"),
                }
                self.persist(&data)?;
                Ok(data.todos)
            }
            None => {
                let next_id = id_after(self.next_id)?;
                let todo = fields.into_todo(self.next_id);
                data.todos.push(todo.clone());
                self.persist(&data)?;
                self.next_id = next_id;
                debug!(collection = %self.name, id = todo.id, "created todo");
                Ok(vec![todo])
            }
        }
    }

    fn remove(&mut self, id: TodoId) -> Result<Vec<Todo>> {
        let mut data = self.load()?;
        if let Some(pos) = data.todos.iter().position(|t| t.id == id) {
            data.todos.remove(pos);
            debug!(collection = %self.name, id, "removed todo");
        }
        self.persist(&data)?;
        Ok(data.todos)
    }

    fn drop_collection(&mut self) -> Result<Vec<Todo>> {
        let data = CollectionData::default();
        self.persist(&data)?;
        self.next_id = 0;
        debug!(collection = %self.name, "dropped collection");
        Ok(data.todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn open() -> LocalStore<MemBackend> {
        LocalStore::open(MemBackend::new(), "todos").unwrap()
    }

    fn insert(store: &mut LocalStore<MemBackend>, title: &str) -> Todo {
        store
            .save(TodoPatch::title(title), None)
            .unwrap()
            .pop()
            .unwrap()
    }

    #[test]
    fn open_initializes_missing_collection() {
        let store = open();
        let raw = store.backend().get_item("todos").unwrap().unwrap();
        let data: CollectionData = serde_json::from_str(&raw).unwrap();
        assert!(data.todos.is_empty());
        assert_eq!(store.next_id(), 0);
    }

    #[test]
    fn open_resumes_counter_after_highest_id() {
        let backend = MemBackend::new().with_item(
            "todos",
            r#"{"todos":[{"id":4,"title":"a","completed":false},{"id":9,"title":"b","completed":true},{"id":2,"title":"c","completed":false}]}"#,
        );
        let mut store = LocalStore::open(backend, "todos").unwrap();
        assert_eq!(store.next_id(), 10);
        assert_eq!(insert(&mut store, "d").id, 10);
    }

    #[test]
    fn open_rejects_corrupt_entry() {
        let backend = MemBackend::new().with_item("todos", "not json");
        let err = LocalStore::open(backend, "todos").err().unwrap();
        assert!(matches!(err, TodoError::Serialization(_)));
    }

    #[test]
    fn open_rejects_exhausted_id_space() {
        let backend = MemBackend::new().with_item(
            "todos",
            r#"{"todos":[{"id":18446744073709551615,"title":"last","completed":false}]}"#,
        );
        assert!(matches!(
            LocalStore::open(backend, "todos"),
            Err(TodoError::Store(_))
        ));
    }

    #[test]
    fn insert_refuses_the_last_id() {
        let backend = MemBackend::new().with_item(
            "todos",
            r#"{"todos":[{"id":18446744073709551614,"title":"last","completed":false}]}"#,
        );
        let mut store = LocalStore::open(backend, "todos").unwrap();
        assert_eq!(store.next_id(), u64::MAX);

        let err = store.save(TodoPatch::title("one more"), None).err().unwrap();
        assert!(matches!(err, TodoError::Store(_)));
        assert_eq!(store.find_all().unwrap().len(), 1);
        assert_eq!(store.next_id(), u64::MAX);
    }

    #[test]
    fn insert_returns_single_new_record() {
        let mut store = open();
        let created = store.save(TodoPatch::title("milk"), None).unwrap();
        assert_eq!(
            created,
            vec![Todo {
                id: 0,
                title: "milk".into(),
                completed: false
            }]
        );
    }

    #[test]
    fn ids_strictly_increase_and_are_not_reused() {
        let mut store = open();
        let a = insert(&mut store, "a");
        let b = insert(&mut store, "b");
        store.remove(b.id).unwrap();
        let c = insert(&mut store, "c");
        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = open();
        for title in ["one", "two", "three"] {
            insert(&mut store, title);
        }
        let titles: Vec<_> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[test]
    fn update_merges_and_returns_whole_collection() {
        let mut store = open();
        let a = insert(&mut store, "a");
        insert(&mut store, "b");

        let all = store.save(TodoPatch::completed(true), Some(a.id)).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(
            all[0],
            Todo {
                id: a.id,
                title: "a".into(),
                completed: true
            }
        );
    }

    #[test]
    fn update_of_unknown_id_changes_nothing() {
        let mut store = open();
        insert(&mut store, "a");
        let before = store.find_all().unwrap();
        let after = store.save(TodoPatch::title("zzz"), Some(99)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn completed_update_is_visible_to_queries() {
        let mut store = open();
        let a = insert(&mut store, "a");
        store.save(TodoPatch::completed(true), Some(a.id)).unwrap();

        let done = store.find(&TodoQuery::completed(true)).unwrap();
        let open_items = store.find(&TodoQuery::completed(false)).unwrap();
        assert!(done.iter().any(|t| t.id == a.id));
        assert!(!open_items.iter().any(|t| t.id == a.id));
    }

    #[test]
    fn find_by_id_round_trips_saved_fields() {
        let mut store = open();
        let fields = TodoPatch::title("bread").with_completed(true);
        let id = store.save(fields, None).unwrap()[0].id;

        let found = store.find(&TodoQuery::by_id(id)).unwrap();
        assert_eq!(
            found,
            vec![Todo {
                id,
                title: "bread".into(),
                completed: true
            }]
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = open();
        let a = insert(&mut store, "a");
        insert(&mut store, "b");

        let after_first = store.remove(a.id).unwrap();
        let after_second = store.remove(a.id).unwrap();
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.len(), 1);
    }

    #[test]
    fn drop_clears_and_resets_counter() {
        let mut store = open();
        insert(&mut store, "a");
        insert(&mut store, "b");

        assert!(store.drop_collection().unwrap().is_empty());
        assert!(store.find_all().unwrap().is_empty());
        assert_eq!(insert(&mut store, "c").id, 0);
    }

    #[test]
    fn externally_removed_entry_reads_as_empty() {
        let mut store = open();
        insert(&mut store, "a");
        store.backend().clear_item("todos");
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn failed_write_does_not_advance_counter() {
        let mut store = open();
        store.backend().set_simulate_write_error(true);
        assert!(store.save(TodoPatch::title("a"), None).is_err());
        store.backend().set_simulate_write_error(false);
        assert_eq!(insert(&mut store, "b").id, 0);
    }

    #[test]
    fn collections_are_isolated_by_name() {
        let backend = MemBackend::new();
        let mut work = LocalStore::open(backend, "work").unwrap();
        insert(&mut work, "report");
        assert!(work.backend().get_item("home").unwrap().is_none());
    }
}
