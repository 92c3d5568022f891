//! Framework detection tables
//!
//! Detection is an ordered table walk: the first entry whose dependency is
//! declared wins, so meta-frameworks are listed before the bundlers and view
//! libraries they are built on.

use std::fmt;
use std::path::Path;

/// Frontend / server framework recognised in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    NextJs,
    Nuxt,
    Remix,
    SvelteKit,
    Astro,
    Gatsby,
    Angular,
    Vue,
    CreateReactApp,
    Vite,
    React,
    Svelte,
    Express,
}

/// `(dependency name, framework)` in precedence order.
pub const DEPENDENCY_TABLE: &[(&str, Framework)] = &[
    ("next", Framework::NextJs),
    ("nuxt", Framework::Nuxt),
    ("@remix-run/react", Framework::Remix),
    ("@sveltejs/kit", Framework::SvelteKit),
    ("astro", Framework::Astro),
    ("gatsby", Framework::Gatsby),
    ("@angular/core", Framework::Angular),
    ("vue", Framework::Vue),
    ("react-scripts", Framework::CreateReactApp),
    ("vite", Framework::Vite),
    ("react", Framework::React),
    ("svelte", Framework::Svelte),
    ("express", Framework::Express),
];

/// `(config file name, framework)` consulted when no dependency matches.
pub const CONFIG_FILE_TABLE: &[(&str, Framework)] = &[
    ("next.config.js", Framework::NextJs),
    ("next.config.mjs", Framework::NextJs),
    ("next.config.ts", Framework::NextJs),
    ("nuxt.config.ts", Framework::Nuxt),
    ("nuxt.config.js", Framework::Nuxt),
    ("svelte.config.js", Framework::SvelteKit),
    ("astro.config.mjs", Framework::Astro),
    ("gatsby-config.js", Framework::Gatsby),
    ("angular.json", Framework::Angular),
    ("vite.config.ts", Framework::Vite),
    ("vite.config.js", Framework::Vite),
];

impl Framework {
    pub fn label(&self) -> &'static str {
        match self {
            Framework::NextJs => "Next.js",
            Framework::Nuxt => "Nuxt",
            Framework::Remix => "Remix",
            Framework::SvelteKit => "SvelteKit",
            Framework::Astro => "Astro",
            Framework::Gatsby => "Gatsby",
            Framework::Angular => "Angular",
            Framework::Vue => "Vue",
            Framework::CreateReactApp => "Create React App",
            Framework::Vite => "Vite",
            Framework::React => "React",
            Framework::Svelte => "Svelte",
            Framework::Express => "Express",
        }
    }

    /// Frameworks whose build produces server code the host must compile itself.
    pub fn is_full_stack(&self) -> bool {
        matches!(
            self,
            Framework::NextJs | Framework::Nuxt | Framework::Remix | Framework::SvelteKit
        )
    }

    /// Frameworks whose output is a static bundle.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            Framework::Astro
                | Framework::Gatsby
                | Framework::Angular
                | Framework::Vue
                | Framework::CreateReactApp
                | Framework::Vite
                | Framework::React
                | Framework::Svelte
        )
    }

    /// First table entry for which `has_dependency` returns true.
    pub fn from_dependencies(has_dependency: impl Fn(&str) -> bool) -> Option<Framework> {
        DEPENDENCY_TABLE
            .iter()
            .find(|(dep, _)| has_dependency(dep))
            .map(|(_, framework)| *framework)
    }

    /// First config-file entry present under `root`.
    pub fn from_config_files(root: &Path) -> Option<Framework> {
        CONFIG_FILE_TABLE
            .iter()
            .find(|(file, _)| root.join(file).is_file())
            .map(|(_, framework)| *framework)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |dep| names.contains(&dep)
    }

    #[test]
    fn meta_framework_wins_over_its_view_library() {
        assert_eq!(
            Framework::from_dependencies(deps(&["react", "react-dom", "next"])),
            Some(Framework::NextJs)
        );
    }

    #[test]
    fn sveltekit_wins_over_vite_and_svelte() {
        assert_eq!(
            Framework::from_dependencies(deps(&["vite", "svelte", "@sveltejs/kit"])),
            Some(Framework::SvelteKit)
        );
    }

    #[test]
    fn vite_wins_over_plain_react() {
        assert_eq!(
            Framework::from_dependencies(deps(&["react", "vite"])),
            Some(Framework::Vite)
        );
    }

    #[test]
    fn no_dependency_match_yields_none() {
        assert_eq!(Framework::from_dependencies(deps(&["lodash"])), None);
    }

    #[test]
    fn config_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nuxt.config.ts"), "export default {}").unwrap();
        assert_eq!(Framework::from_config_files(dir.path()), Some(Framework::Nuxt));
    }

    #[test]
    fn full_stack_classification() {
        assert!(Framework::NextJs.is_full_stack());
        assert!(!Framework::Vite.is_full_stack());
        assert!(Framework::Vite.is_static());
        assert!(!Framework::Express.is_static());
    }
}
