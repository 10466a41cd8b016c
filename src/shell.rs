use crate::backend::ProfileWithTeam;

/// Server-rendered dashboard chrome. The profile and viewer identity are
/// explicit inputs passed down from the request pipeline; the shell performs
/// no lookups of its own.
pub struct DashboardShell {
    profile: Option<ProfileWithTeam>,
    viewer_email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

impl DashboardShell {
    pub fn new(profile: Option<ProfileWithTeam>, viewer_email: &str) -> Self {
        Self { profile, viewer_email: viewer_email.to_string() }
    }

    /// Navigation entries for the sidebar. Team management only shows up for
    /// team owners.
    pub fn nav_items(&self) -> Vec<NavItem> {
        let mut items = vec![
            NavItem { label: "Overview", href: "/dashboard" },
            NavItem { label: "Todos", href: "/dashboard/todos" },
            NavItem { label: "Projects", href: "/dashboard/projects" },
            NavItem { label: "Docs", href: "/dashboard/docs" },
            NavItem { label: "Calendar", href: "/dashboard/calendar" },
            NavItem { label: "Notifications", href: "/dashboard/notifications" },
        ];

        if self.profile.as_ref().is_some_and(|p| p.is_team_owner()) {
            items.push(NavItem { label: "Team", href: "/dashboard/team" });
        }

        items
    }

    pub fn render(&self, content: &str) -> String {
        let nav = self
            .nav_items()
            .iter()
            .map(|item| format!("<li><a href=\"{}\">{}</a></li>", item.href, item.label))
            .collect::<Vec<_>>()
            .join("\n");

        // Profile may be unavailable when the guard degraded softly; the
        // session email still identifies the viewer
        let identity = match &self.profile {
            Some(p) => match &p.team {
                Some(team) => {
                    format!("{} &middot; {}", escape(&p.profile.display_name), escape(&team.name))
                }
                None => escape(&p.profile.display_name),
            },
            None => escape(&self.viewer_email),
        };

        format!(
            "<!doctype html>\n<html>\n<head><title>Taskhub</title></head>\n<body>\n\
             <header><span class=\"identity\">{identity}</span></header>\n\
             <nav><ul>\n{nav}\n</ul></nav>\n\
             <main>{content}</main>\n\
             </body>\n</html>"
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
