use crate::config::TodosConfig;
use crate::controller::Controller;
use crate::error::{Result, TodoError};
use crate::model::TodoModel;
use crate::store::fs_backend::FsBackend;
use crate::store::local_store::LocalStore;
use crate::view::terminal::TerminalView;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the platform data directory.
pub const DATA_DIR_ENV: &str = "TODOS_DATA";
const LISTS_DIR: &str = "lists";

pub type TodoApp = Controller<LocalStore<FsBackend>, TerminalView>;

pub struct TodosContext {
    pub app: TodoApp,
    pub config: TodosConfig,
    pub data_dir: PathBuf,
    /// Name of the list that was opened.
    pub collection: String,
}

/// `$TODOS_DATA` when set, otherwise the platform data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "todos", "todos")
        .ok_or_else(|| TodoError::Config("Could not determine data dir".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn lists_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LISTS_DIR)
}

/// Wires store, model, view and controller for one list.
///
/// `list` overrides the configured collection. Nothing is rendered yet; the
/// caller picks the first route with [`Controller::set_view`].
pub fn initialize(data_dir: &Path, list: Option<&str>) -> Result<TodosContext> {
    let config = TodosConfig::load(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config");
        TodosConfig::default()
    });
    let collection = list.unwrap_or(config.collection.as_str()).to_string();

    let backend = FsBackend::new(lists_dir(data_dir));
    let store = LocalStore::open(backend, collection.clone())?;
    debug!(data_dir = %data_dir.display(), %collection, "initialized");

    let app = Controller::new(TodoModel::new(store), TerminalView::new());

    Ok(TodosContext {
        app,
        config,
        data_dir: data_dir.to_path_buf(),
        collection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_default_list() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path(), None).unwrap();

        assert_eq!(ctx.collection, "todos");
        assert!(lists_dir(temp.path()).join("todos.json").exists());
    }

    #[test]
    fn test_list_argument_overrides_config() {
        let temp = TempDir::new().unwrap();
        let mut config = TodosConfig::default();
        config.set("collection", "work").unwrap();
        config.save(temp.path()).unwrap();

        assert_eq!(initialize(temp.path(), None).unwrap().collection, "work");
        assert_eq!(
            initialize(temp.path(), Some("home")).unwrap().collection,
            "home"
        );
    }

    #[test]
    fn test_unreadable_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), "not json").unwrap();

        let ctx = initialize(temp.path(), None).unwrap();
        assert_eq!(ctx.config.color, ColorChoice::Auto);
        assert_eq!(ctx.collection, "todos");
    }

    #[test]
    fn test_invalid_list_name_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(initialize(temp.path(), Some("../outside")).is_err());
    }

    #[test]
    fn test_state_survives_reinitialization() {
        let temp = TempDir::new().unwrap();
        {
            let mut ctx = initialize(temp.path(), None).unwrap();
            ctx.app.set_view("").unwrap();
            ctx.app
                .handle(crate::view::UiEvent::NewTodo("persisted".into()))
                .unwrap();
        }

        let ctx = initialize(temp.path(), None).unwrap();
        let todos = ctx.app.model().read_all().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "persisted");
    }
}
