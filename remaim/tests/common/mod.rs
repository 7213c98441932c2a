#![allow(dead_code)]

use async_trait::async_trait;
use remaim::redmine::{Attachment, IssueList, NamedRef, SourceIssue, SourceProject};
use remaim::{Conduit, ConduitError, PromptError, SourceClient, SourceError, Terminal};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Conduit double that replays scripted results and records every call.
///
/// Results queued with [`FakeConduit::respond`] are consumed in order; once
/// a method's queue is empty the result set with [`FakeConduit::always`] is
/// used. Unscripted calls fail with an API error.
#[derive(Default)]
pub struct FakeConduit {
    queued: Mutex<HashMap<String, VecDeque<Value>>>,
    fixed: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeConduit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: &str, result: Value) -> Self {
        self.queued
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn always(self, method: &str, result: Value) -> Self {
        self.fixed
            .lock()
            .unwrap()
            .insert(method.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(called, _)| called == method)
            .map(|(_, params)| params)
            .collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }
}

#[async_trait]
impl Conduit for FakeConduit {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ConduitError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        if let Some(result) = queued {
            return Ok(result);
        }
        if let Some(result) = self.fixed.lock().unwrap().get(method) {
            return Ok(result.clone());
        }
        Err(ConduitError::Api {
            method: method.to_string(),
            code: "ERR-UNSCRIPTED".to_string(),
            info: "no scripted result".to_string(),
        })
    }
}

/// In-memory Redmine.
#[derive(Default)]
pub struct FakeSource {
    pub projects: Vec<SourceProject>,
    pub issues: HashMap<u64, Vec<SourceIssue>>,
    pub members: HashMap<u64, Vec<String>>,
    pub files: HashMap<String, Vec<u8>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: SourceProject, issues: Vec<SourceIssue>) -> Self {
        self.issues.insert(project.id, issues);
        self.projects.push(project);
        self
    }

    pub fn with_members(mut self, project_id: u64, names: &[&str]) -> Self {
        self.members
            .insert(project_id, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_file(mut self, content_url: &str, bytes: &[u8]) -> Self {
        self.files.insert(content_url.to_string(), bytes.to_vec());
        self
    }

    fn not_found(what: &str) -> SourceError {
        SourceError::Http {
            url: what.to_string(),
            status: 404,
        }
    }
}

#[async_trait]
impl SourceClient for FakeSource {
    async fn check_connection(&self) -> Result<(), SourceError> {
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<SourceProject>, SourceError> {
        Ok(self.projects.clone())
    }

    async fn project_details(&self, project_id: u64) -> Result<SourceProject, SourceError> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| Self::not_found("project"))
    }

    async fn issues_for_project(&self, project_id: u64) -> Result<IssueList, SourceError> {
        let issues = self.issues.get(&project_id).cloned().unwrap_or_default();
        if issues.is_empty() {
            return Err(SourceError::NoIssuesFound { project_id });
        }
        Ok(IssueList {
            total_count: issues.len(),
            issues,
        })
    }

    async fn issue_detail(&self, issue_id: u64) -> Result<SourceIssue, SourceError> {
        self.issues
            .values()
            .flatten()
            .find(|issue| issue.id == issue_id)
            .cloned()
            .ok_or_else(|| Self::not_found("issue"))
    }

    async fn project_members(&self, project_id: u64) -> Result<Vec<String>, SourceError> {
        Ok(self.members.get(&project_id).cloned().unwrap_or_default())
    }

    async fn attachment_bytes(&self, attachment: &Attachment) -> Result<Vec<u8>, SourceError> {
        self.files
            .get(&attachment.content_url)
            .cloned()
            .ok_or_else(|| Self::not_found(&attachment.content_url))
    }
}

/// Terminal that replays answers and captures everything shown.
///
/// Running out of answers behaves like a closed stdin.
#[derive(Default)]
pub struct ScriptedTerminal {
    answers: VecDeque<String>,
    pub output: String,
    pub questions: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_line(&mut self) -> Result<String, PromptError> {
        self.answers.pop_front().ok_or(PromptError::Closed)
    }

    fn prompt(&mut self, question: &str) -> Result<String, PromptError> {
        self.questions.push(question.to_string());
        self.print(&format!("{question}:\n> "));
        Ok(self.read_line()?.trim().to_string())
    }
}

pub fn project(id: u64, name: &str) -> SourceProject {
    SourceProject {
        id,
        name: name.to_string(),
        identifier: Some(name.to_lowercase()),
        description: Some(format!("{name} issues")),
    }
}

pub fn issue(id: u64, title: &str, description: &str, status: &str) -> SourceIssue {
    let mut issue = SourceIssue::new(id, title, status);
    issue.description = Some(description.to_string());
    issue
}

pub fn watched_by(mut issue: SourceIssue, names: &[&str]) -> SourceIssue {
    issue.watchers = names.iter().map(|n| NamedRef::named(*n)).collect();
    issue
}

/// A `maniphest.query` record.
pub fn task(id: u64, title: &str, description: &str) -> Value {
    json!({
        "id": id.to_string(),
        "phid": format!("PHID-TASK-{id}"),
        "title": title,
        "description": description,
        "statusName": "Open",
        "ownerPHID": null,
        "projectPHIDs": ["PHID-PROJ-1"],
        "priority": "Normal",
    })
}

/// A `maniphest.edit` result.
pub fn edited(id: u64) -> Value {
    json!({ "object": { "id": id, "phid": format!("PHID-TASK-{id}") }, "transactions": [] })
}

/// A `maniphest.querystatuses` result.
pub fn statuses() -> Value {
    json!({
        "defaultStatus": "open",
        "statusMap": { "open": "Open", "resolved": "Resolved", "wontfix": "Wontfix" },
    })
}
