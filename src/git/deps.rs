use std::fmt;

/// External programs the run cannot do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Git,
    Gnuplot,
}

impl Dependency {
    pub fn program(self) -> &'static str {
        match self {
            Dependency::Git => "git",
            Dependency::Gnuplot => "gnuplot",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Dependency::Git => "The git is not available.",
            Dependency::Gnuplot => {
                "The gnuplot is not available.\n\
                 This tool uses gnuplot to create png images from the statistics \
                 about the local git repositories.\n\
                 Install it with your package manager, e.g. `sudo zypper install gnuplot`."
            }
        }
    }

    pub fn is_available(self) -> bool {
        which::which(self.program()).is_ok()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

pub fn missing_dependencies() -> Vec<Dependency> {
    [Dependency::Gnuplot, Dependency::Git]
        .into_iter()
        .filter(|dep| !dep.is_available())
        .collect()
}
