//! HTML rendering
//!
//! Minijinja environment over embedded templates, fed with typed view
//! models. Handlers compute everything the page needs (sorting, completion
//! counts, flash messages) so the templates stay logic-free.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use todo_core::TodoList;

/// Flash messages consumed from the session for the page being rendered.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    /// Take both flash slots out of the session data, clearing them.
    pub fn consume(session: &mut session_store::SessionData) -> Self {
        Self {
            error: session.take_error(),
            success: session.take_success(),
        }
    }
}

/// One row on the lists index page.
#[derive(Debug, Serialize)]
pub struct ListSummary {
    pub index: usize,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub complete: bool,
}

impl ListSummary {
    pub fn from_list(index: usize, list: &TodoList) -> Self {
        let (completed, total) = list.completion_counts();
        Self {
            index,
            name: list.name.clone(),
            completed,
            total,
            complete: list.is_complete(),
        }
    }
}

/// One to-do row on the list detail page.
#[derive(Debug, Serialize)]
pub struct TodoView {
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ListsPage {
    #[serde(flatten)]
    pub flash: Flash,
    pub lists: Vec<ListSummary>,
}

#[derive(Debug, Serialize)]
pub struct NewListPage {
    #[serde(flatten)]
    pub flash: Flash,
    /// Submitted value, preserved across a failed validation.
    pub list_name: String,
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    #[serde(flatten)]
    pub flash: Flash,
    pub index: usize,
    pub name: String,
    pub complete: bool,
    pub completed: usize,
    pub total: usize,
    /// Incomplete items first, completed after.
    pub todos: Vec<TodoView>,
    /// Submitted item name, preserved across a failed validation.
    pub todo_name: String,
}

impl ListPage {
    pub fn from_list(index: usize, list: &TodoList, flash: Flash, todo_name: String) -> Self {
        let (completed, total) = list.completion_counts();
        Self {
            flash,
            index,
            name: list.name.clone(),
            complete: list.is_complete(),
            completed,
            total,
            todos: list
                .todos_by_completion()
                .into_iter()
                .map(|todo| TodoView {
                    id: todo.id,
                    name: todo.name.clone(),
                    completed: todo.completed,
                })
                .collect(),
            todo_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditListPage {
    #[serde(flatten)]
    pub flash: Flash,
    pub index: usize,
    pub name: String,
    /// Submitted value, preserved across a failed validation.
    pub list_name: String,
}

/// Template registry. HTML-escaping is minijinja's default for `.html`
/// template names; strict undefined catches view-model drift in tests.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template("lists.html", include_str!("../templates/lists.html"))?;
        env.add_template("new_list.html", include_str!("../templates/new_list.html"))?;
        env.add_template("list.html", include_str!("../templates/list.html"))?;
        env.add_template("edit_list.html", include_str!("../templates/edit_list.html"))?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        template: &str,
        page: impl Serialize,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(page)
    }
}
