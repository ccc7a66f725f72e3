//! In-memory store implementations.
//!
//! Test doubles for the Postgres repositories, selected by injection. Each
//! store does its uniqueness check and insert inside one critical section,
//! matching the atomicity the database constraint gives the real store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Role;
use chrono::Utc;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::Login;
use crate::identity::ports::CredentialStore;
use crate::project::errors::ProjectError;
use crate::project::models::CreateProjectCommand;
use crate::project::models::Project;
use crate::project::ports::ProjectRepository;

#[derive(Default)]
struct IdentityTable {
    rows: HashMap<i64, Identity>,
    next_id: i64,
}

/// In-memory credential store.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    table: Mutex<IdentityTable>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored role; mirrors an administrative role change done
    /// outside the auth core.
    pub fn set_role(&self, id: i64, role: Role) -> bool {
        let mut table = self.table.lock().expect("credential store lock poisoned");
        match table.rows.get_mut(&id) {
            Some(identity) => {
                identity.role = role;
                true
            }
            None => false,
        }
    }

    /// Delete an identity; mirrors an out-of-band removal.
    pub fn remove(&self, id: i64) -> bool {
        let mut table = self.table.lock().expect("credential store lock poisoned");
        table.rows.remove(&id).is_some()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(
        &self,
        login: &Login,
        password_hash: &str,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        let mut table = self.table.lock().expect("credential store lock poisoned");

        if table.rows.values().any(|row| &row.login == login) {
            return Err(IdentityError::LoginTaken(login.to_string()));
        }

        table.next_id += 1;
        let identity = Identity {
            id: table.next_id,
            login: login.clone(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        table.rows.insert(identity.id, identity.clone());

        Ok(identity)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<Identity>, IdentityError> {
        let table = self.table.lock().expect("credential store lock poisoned");
        Ok(table.rows.values().find(|row| &row.login == login).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityError> {
        let table = self.table.lock().expect("credential store lock poisoned");
        Ok(table.rows.get(&id).cloned())
    }

    async fn update_password_hash(&self, id: i64, new_hash: &str) -> Result<(), IdentityError> {
        let mut table = self.table.lock().expect("credential store lock poisoned");
        match table.rows.get_mut(&id) {
            Some(identity) => {
                identity.password_hash = new_hash.to_string();
                Ok(())
            }
            None => Err(IdentityError::NotFound(id)),
        }
    }
}

#[derive(Default)]
struct ProjectTable {
    rows: HashMap<i64, Project>,
    next_id: i64,
}

/// In-memory project repository.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    table: Mutex<ProjectTable>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(
        &self,
        owner_id: i64,
        command: CreateProjectCommand,
    ) -> Result<Project, ProjectError> {
        let mut table = self.table.lock().expect("project store lock poisoned");

        if table.rows.values().any(|row| row.title == command.title) {
            return Err(ProjectError::TitleTaken(command.title.to_string()));
        }

        table.next_id += 1;
        let project = Project {
            id: table.next_id,
            owner_id,
            title: command.title,
            description: command.description,
            created_at: Utc::now(),
        };
        table.rows.insert(project.id, project.clone());

        Ok(project)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, ProjectError> {
        let table = self.table.lock().expect("project store lock poisoned");
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, project: Project) -> Result<Project, ProjectError> {
        let mut table = self.table.lock().expect("project store lock poisoned");

        if table
            .rows
            .values()
            .any(|row| row.id != project.id && row.title == project.title)
        {
            return Err(ProjectError::TitleTaken(project.title.to_string()));
        }
        if !table.rows.contains_key(&project.id) {
            return Err(ProjectError::NotFound(project.id));
        }

        table.rows.insert(project.id, project.clone());
        Ok(project)
    }
}
