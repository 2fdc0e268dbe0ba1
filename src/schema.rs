// Struct representing the request body for creating a new Todo
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateTodoSchema {
    pub text: String,
}

// Struct representing the request body for updating a Todo
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateTodoSchema {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

// Form posted by the add box on the home page
#[derive(Debug, serde::Deserialize)]
pub struct AddTodoForm {
    #[serde(default)]
    pub todo: Option<String>,
}
