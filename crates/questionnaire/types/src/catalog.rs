//! Question catalog: the validated, priority-ordered set of questions
//!
//! The catalog is built once per questionnaire session. Construction sorts a
//! copy of the definitions by ascending priority (stable, so ties keep their
//! input order) and validates the dependency graph. A catalog that passes
//! validation can always surface every question whose prerequisites are
//! answered while walking forward.

use crate::{QuestionDefinition, QuestionId, QuestionnaireError, QuestionnaireResult};
use std::collections::{HashMap, HashSet};

/// An immutable, validated list of questions in asking order
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
    positions: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Sort and validate a list of question definitions
    pub fn new(mut questions: Vec<QuestionDefinition>) -> QuestionnaireResult<Self> {
        questions.sort_by_key(|q| q.priority);

        let mut positions = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if positions.insert(question.id.clone(), index).is_some() {
                return Err(QuestionnaireError::DuplicateQuestionId(question.id.clone()));
            }
        }

        let catalog = Self {
            questions,
            positions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// An empty catalog
    pub fn empty() -> Self {
        Self {
            questions: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Validate the dependency graph.
    ///
    /// Rejects self references, references to unknown ids, cycles, and
    /// dependencies ordered at or after their dependent.
    fn validate(&self) -> QuestionnaireResult<()> {
        for question in &self.questions {
            for dep in &question.depends_on {
                if dep == &question.id {
                    return Err(QuestionnaireError::SelfDependency(question.id.clone()));
                }
                if !self.positions.contains_key(dep) {
                    return Err(QuestionnaireError::DanglingDependency {
                        question: question.id.clone(),
                        missing: dep.clone(),
                    });
                }
            }
        }

        if let Some(cycle) = self.find_cycle() {
            return Err(QuestionnaireError::DependencyCycle(cycle));
        }

        for (index, question) in self.questions.iter().enumerate() {
            for dep in &question.depends_on {
                if self.positions[dep] > index {
                    return Err(QuestionnaireError::DependencyUnsatisfiable {
                        question: question.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Depth-first search for a cycle; returns the path closing on itself
    fn find_cycle(&self) -> Option<Vec<QuestionId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.questions.len()];

        for root in 0..self.questions.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // Stack of (node, next dependency index to explore)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            marks[root] = Mark::InProgress;

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let deps = &self.questions[node].depends_on;
                if top.1 < deps.len() {
                    let dep = self.positions[&deps[top.1]];
                    top.1 += 1;
                    match marks[dep] {
                        Mark::Unvisited => {
                            marks[dep] = Mark::InProgress;
                            stack.push((dep, 0));
                        }
                        Mark::InProgress => {
                            let start = stack.iter().position(|(n, _)| *n == dep)?;
                            let mut path: Vec<QuestionId> = stack[start..]
                                .iter()
                                .map(|(n, _)| self.questions[*n].id.clone())
                                .collect();
                            path.push(self.questions[dep].id.clone());
                            return Some(path);
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }

        None
    }

    /// Questions in asking order
    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    /// Question at a sorted position
    pub fn get(&self, index: usize) -> Option<&QuestionDefinition> {
        self.questions.get(index)
    }

    /// Look up a question by id anywhere in the catalog
    pub fn find(&self, id: &QuestionId) -> Option<&QuestionDefinition> {
        self.positions.get(id).map(|&index| &self.questions[index])
    }

    /// Sorted position of a question id
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.positions.contains_key(id)
    }

    /// Ids of every required question
    pub fn required_ids(&self) -> HashSet<&QuestionId> {
        self.questions
            .iter()
            .filter(|q| q.required)
            .map(|q| &q.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
