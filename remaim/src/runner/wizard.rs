//! Interactive session: project selection, policies and confirmation.

use super::choice::{parse_project_choice, ProjectChoice};
use super::migrator::Migrator;
use super::RunnerError;
use crate::catalog::{ProjectCatalog, ProjectQuery, TargetProject};
use crate::conduit::Conduit;
use crate::prompt::{confirm, select_index, PromptError, Terminal};
use crate::redmine::{SourceClient, SourceError, SourceProject};
use crate::summary::{RunSummary, SubmissionResult};
use crate::transactions::Policies;
use tracing::{info, warn};

const TARGET_PROJECT_QUESTION: &str = "Please enter the id or slug of the project in Phabricator if you know it.\n\
Press\n\
[Enter] to see a list of available projects in Phabricator,\n\
[0] to create a new project from the Redmine project's details or\n\
[q] to quit and abort";

const NO_ACCESS: &str = "Sorry, there is no such project or you have no access to it. \
Please check your permissions and the id or slug you specified and try again.\n";

enum ProjectOutcome {
    Migrated(Vec<SubmissionResult>),
    NoIssues(u64),
    Declined,
    Quit,
}

/// Walks the operator through one or more project migrations.
pub struct Wizard<'a> {
    conduit: &'a dyn Conduit,
    source: &'a dyn SourceClient,
    catalog: ProjectCatalog<'a>,
    migrator: Migrator<'a>,
}

impl<'a> Wizard<'a> {
    pub fn new(
        conduit: &'a dyn Conduit,
        source: &'a dyn SourceClient,
        migrator: Migrator<'a>,
    ) -> Self {
        Self {
            conduit,
            source,
            catalog: ProjectCatalog::new(conduit),
            migrator,
        }
    }

    /// Migrates projects until the operator is done.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on the first failure that is not recovered
    /// by asking the operator.
    pub async fn run(&mut self, terminal: &mut dyn Terminal) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new();
        loop {
            match self.migrate_project(terminal).await? {
                ProjectOutcome::Migrated(results) => {
                    summary.record_project(&results);
                    let submitted = results.iter().filter(|r| !r.is_skipped()).count();
                    terminal.print(&format!(
                        "{submitted} tickets successfully migrated or updated!\n"
                    ));
                    if !confirm(terminal, "Import another project? [y/N]")? {
                        break;
                    }
                }
                ProjectOutcome::NoIssues(project_id) => {
                    let question = format!(
                        "There were no issues found on the selected project with ID {project_id}\n\
                         Would you like to continue with another project? [y/N]"
                    );
                    if !confirm(terminal, &question)? {
                        terminal.print("Bye bye! See you soon!\n");
                        break;
                    }
                }
                ProjectOutcome::Declined => {
                    terminal.print("Nothing was migrated. Please visit again soon!\n");
                    break;
                }
                ProjectOutcome::Quit => {
                    terminal.print("Bye bye!\n");
                    break;
                }
            }
        }
        Ok(summary)
    }

    async fn migrate_project(
        &mut self,
        terminal: &mut dyn Terminal,
    ) -> Result<ProjectOutcome, RunnerError> {
        let Some(source_project) = self.select_source_project(terminal).await? else {
            return Ok(ProjectOutcome::Quit);
        };

        let issues = match self.source.issues_for_project(source_project.id).await {
            Ok(issues) => issues,
            Err(SourceError::NoIssuesFound { project_id }) => {
                return Ok(ProjectOutcome::NoIssues(project_id));
            }
            Err(e) => return Err(e.into()),
        };

        let Some((target, policies)) = self.select_target_project(&source_project, terminal).await?
        else {
            return Ok(ProjectOutcome::Quit);
        };
        let policies = match policies {
            Some(policies) => policies,
            None => self.select_policies(terminal).await?,
        };

        if !present_summary(terminal, &source_project, &target, &policies, issues.total_count)? {
            return Ok(ProjectOutcome::Declined);
        }

        info!(
            source = %source_project.name,
            target = %target.name,
            count = issues.issues.len(),
            "Migrating issues"
        );
        terminal.print("Working...\n");
        let results = self
            .migrator
            .migrate(&issues.issues, &target, &policies, terminal)
            .await?;
        Ok(ProjectOutcome::Migrated(results))
    }

    async fn select_source_project(
        &self,
        terminal: &mut dyn Terminal,
    ) -> Result<Option<SourceProject>, RunnerError> {
        terminal.print(
            "Stand by while we are retrieving a list of projects from your Redmine instance...\n",
        );
        let projects = self.source.list_projects().await?;
        if projects.is_empty() {
            terminal.print("No projects found in Redmine.\n");
            return Ok(None);
        }

        for project in &projects {
            terminal.print(&format!("[{} – {}]\n", project.id, project.name));
        }
        let id = loop {
            let answer = terminal.prompt("Please select (type) a project ID")?;
            let listed = answer
                .parse::<u64>()
                .ok()
                .filter(|id| projects.iter().any(|p| p.id == *id));
            match listed {
                Some(id) => break id,
                None => terminal.print("Please type one of the listed project IDs\n"),
            }
        };

        let project = self.source.project_details(id).await?;
        info!(id = project.id, name = %project.name, "Selected Redmine project");
        Ok(Some(project))
    }

    /// Returns the target project, plus the policies if they were chosen
    /// while creating it.
    async fn select_target_project(
        &mut self,
        source_project: &SourceProject,
        terminal: &mut dyn Terminal,
    ) -> Result<Option<(TargetProject, Option<Policies>)>, RunnerError> {
        loop {
            let answer = terminal.prompt(TARGET_PROJECT_QUESTION)?;
            let (query, verb) = match parse_project_choice(&answer) {
                ProjectChoice::Quit => return Ok(None),
                ProjectChoice::Browse => match self.browse_projects(terminal).await? {
                    Some(id) => (ProjectQuery::Ids(vec![id]), "Selected"),
                    None => continue,
                },
                ProjectChoice::Create => {
                    let policies = self.select_policies(terminal).await?;
                    let project = self.create_project(source_project, &policies).await?;
                    terminal.print(&format!(
                        "Created project \"{}\" with PHID {}\n",
                        project.name, project.phid
                    ));
                    return Ok(Some((project, Some(policies))));
                }
                ProjectChoice::Id(id) => (ProjectQuery::Ids(vec![id]), "Found"),
                ProjectChoice::Slug(slug) => (ProjectQuery::Slugs(vec![slug]), "Found"),
            };

            match self.catalog.find_by_query(&query).await? {
                Some(project) => {
                    terminal.print(&format!(
                        "{verb} project \"{}\" with PHID {}\n",
                        project.name, project.phid
                    ));
                    info!(id = project.id, name = %project.name, "Selected Phabricator project");
                    return Ok(Some((project, None)));
                }
                None => terminal.print(NO_ACCESS),
            }
        }
    }

    /// Lists every project and returns the id the operator typed, or `None`
    /// to go back.
    async fn browse_projects(
        &self,
        terminal: &mut dyn Terminal,
    ) -> Result<Option<u64>, RunnerError> {
        let mut projects = self.catalog.list_all(None).await?;
        projects.sort_by_key(|project| project.id);
        for project in &projects {
            terminal.print(&project.represent());
        }

        let answer =
            terminal.prompt("Please select (type) a project ID or press [Enter] to go back")?;
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<u64>() {
            Ok(id) if projects.iter().any(|p| p.id == id) => Ok(Some(id)),
            _ => {
                terminal.print(NO_ACCESS);
                Ok(None)
            }
        }
    }

    async fn create_project(
        &mut self,
        source_project: &SourceProject,
        policies: &Policies,
    ) -> Result<TargetProject, RunnerError> {
        let names = self.source.project_members(source_project.id).await?;
        let members = self
            .migrator
            .identities_mut()
            .resolve_handles(self.conduit, &names)
            .await?;

        Ok(self
            .catalog
            .create_project(
                &source_project.name,
                source_project.description.as_deref().unwrap_or_default(),
                members,
                policies,
            )
            .await?)
    }

    async fn select_policies(&self, terminal: &mut dyn Terminal) -> Result<Policies, RunnerError> {
        let groups = self.catalog.list_groups().await?;
        if groups.is_empty() {
            warn!("No group projects found, falling back to the users policy");
            terminal.print(
                "No group projects found; everyone logged in will get view and edit access.\n",
            );
            return Ok(Policies::all_users());
        }

        for (index, group) in groups.iter().enumerate() {
            terminal.print(&format!(
                "[{index}] =>\t[ID]: {}\n\t[Name]: {}\n",
                group.id, group.name
            ));
        }
        let index = select_index(
            terminal,
            "Select a group to get view and edit permissions",
            groups.len(),
        )?;
        let group = &groups[index];
        info!(group = %group.name, "Selected policy group");
        Ok(Policies::uniform(group.phid.clone()))
    }
}

fn present_summary(
    terminal: &mut dyn Terminal,
    source_project: &SourceProject,
    target: &TargetProject,
    policies: &Policies,
    total: usize,
) -> Result<bool, PromptError> {
    terminal.print(&format!(
        "Redmine project named \"{}\" with ID {}.\n\
         Target Phabricator project named \"{}\" with ID {}.\n\
         View policy: {}, Edit policy: {}\n",
        source_project.name, source_project.id, target.name, target.id, policies.view, policies.edit
    ));
    confirm(
        terminal,
        &format!("{total} tickets to be migrated!\n\nOK to continue? [y/N]"),
    )
}
