use serde::Serialize;

use crate::domain::Parameters;

/// A free-text requirement statement attached to a [`System`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    /// Short requirement name.
    pub name: String,
    /// The requirement statement.
    pub description: String,
}

impl Requirement {
    /// Creates a requirement.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Renders the requirement as a markdown bullet.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("- **{}**: {}", self.name, self.description)
    }
}

/// A named function a system performs, optionally backed by parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Short function name.
    pub name: String,
    /// What the function does.
    pub description: String,
    /// Parameters sizing the function, if any.
    pub parameters: Option<Parameters>,
}

impl Function {
    /// Creates a function with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Attaches a parameter set to the function.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Renders the function as a markdown section.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("### Function: {}\n{}", self.name, self.description);
        if let Some(parameters) = &self.parameters {
            out.push_str("\n\n");
            out.push_str(&parameters.to_markdown());
        }
        out
    }
}

/// A node in a design decomposition tree.
///
/// A system owns its children, so a system can never appear as its own
/// descendant; the tree is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    /// System name.
    pub name: String,
    /// What the system is.
    pub description: String,
    /// Parameters sizing the system, if any.
    pub parameters: Option<Parameters>,
    /// Requirements placed on the system, in authoring order.
    pub requirements: Vec<Requirement>,
    /// Functions the system performs, in authoring order.
    pub functions: Vec<Function>,
    /// Child systems, in authoring order.
    pub children: Vec<System>,
}

impl System {
    /// Creates a system with no requirements, functions or children.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
            requirements: Vec::new(),
            functions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attaches a parameter set to the system.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Appends a requirement.
    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Appends a function.
    #[must_use]
    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    /// Appends a child system.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Appends a child system, builder style.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.add_child(child);
        self
    }

    /// Number of systems in the tree, this one included.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }

    /// Renders the system tree as markdown sections.
    ///
    /// Emits the name, description, then `## Parameters`, `## Requirements`,
    /// `## Functions` and `## Subsystems` sections for whichever parts are
    /// present. Children repeat the same layout.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut sections = vec![format!("# System: {}\n{}", self.name, self.description)];

        if let Some(parameters) = &self.parameters {
            sections.push(format!("## Parameters\n\n{}", parameters.to_markdown()));
        }

        if !self.requirements.is_empty() {
            let bullets: Vec<String> =
                self.requirements.iter().map(Requirement::to_markdown).collect();
            sections.push(format!("## Requirements\n\n{}", bullets.join("\n")));
        }

        if !self.functions.is_empty() {
            let functions: Vec<String> =
                self.functions.iter().map(Function::to_markdown).collect();
            sections.push(format!("## Functions\n\n{}", functions.join("\n\n")));
        }

        if !self.children.is_empty() {
            let children: Vec<String> = self.children.iter().map(Self::to_markdown).collect();
            sections.push(format!("## Subsystems\n\n{}", children.join("\n\n")));
        }

        sections.join("\n\n")
    }
}
