use anyhow::Result;

const TOPICS: &[(&str, &[&str])] = &[
    (
        "WHAT SHIPIT DOES",
        &[
            "Validates the project, checks prerequisites and environment variables,",
            "verifies access to GitHub, builds, commits and pushes pending changes,",
            "then deploys to Vercel, falling back through several CLI invocations.",
        ],
    ),
    (
        "COMMON COMMANDS",
        &[
            "shipit                      Interactive menu",
            "shipit -p -m \"message\"      Deploy to production with a commit message",
            "shipit deploy [PATH]        Deploy a preview (add --prod for production)",
            "shipit analyze              Show detected framework, build and env status",
            "shipit fix                  Repair package name, vercel.json and .vercel/",
            "shipit scan --fix           Pull files that live outside the project back in",
            "shipit ssh [--quick]        Set up or repair SSH access to GitHub",
            "shipit doctor               Diagnose prerequisites and configuration",
        ],
    ),
    (
        "SSH ACCESS",
        &[
            "Shipit pushes over SSH. If `ssh -T git@github.com` does not greet you,",
            "run `shipit ssh` to create a key, load it into the agent and register it.",
            "Without SSH, set GITHUB_TOKEN in .env.local to push over HTTPS instead.",
        ],
    ),
    (
        "VERCEL TOKEN",
        &[
            "Create a token at https://vercel.com/account/tokens and store it as",
            "VERCEL_TOKEN in .env.local. Shipit adds .env.local to .gitignore.",
        ],
    ),
    (
        "BUILD FAILURES",
        &[
            "Shipit stops before committing when `npm run build` fails.",
            "Run the build locally, fix the errors, then deploy again.",
            "A vercel.json buildCommand like \"echo 'Build completed'\" skips the real",
            "build for Next.js, Nuxt, Remix and SvelteKit; `shipit fix` removes it.",
        ],
    ),
    (
        "CONFIGURATION",
        &[
            "Optional settings live in .shipit.toml or ~/.config/shipit/config.toml.",
            "SHIPIT_* environment variables override file values.",
            "Set SHIPIT_LOG=debug (or pass -vv) to trace every spawned command.",
        ],
    ),
];

/// The troubleshooting guide as plain text.
pub fn help_text() -> String {
    let mut out = String::from("SHIPIT GUIDE\n");
    for (title, lines) in TOPICS {
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        for line in *lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

pub fn cmd_help_topics() -> Result<()> {
    print!("{}", help_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_is_rendered() {
        let text = help_text();
        for (title, _) in TOPICS {
            assert!(text.contains(title));
        }
        assert!(text.lines().all(|l| l == l.trim_end()));
    }
}
