use std::collections::HashMap;

use crate::session::UserRole;

/// Static metadata attached to a route node.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteMeta {
    /// Whether this subtree requires a signed-in session.
    pub requires_auth: bool,
    /// Role this subtree is restricted to, when any.
    pub role: Option<UserRole>,
    /// Page title shown while the route is active.
    pub title: Option<&'static str>,
}

/// One node of the route tree.
///
/// `path` holds one or more segments: `:name` segments match any value and
/// are captured as parameters, `*` matches the rest of the path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub redirect: Option<&'static str>,
    pub meta: RouteMeta,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            redirect: None,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn redirect_to(mut self, target: &'static str) -> Self {
        self.redirect = Some(target);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.meta.role = Some(role);
        self
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.meta.title = Some(title);
        self
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }

    fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter(|segment| !segment.is_empty())
    }
}

/// A successful match: the node chain from root to leaf plus the captured
/// path parameters. Effective policy is derived over the whole chain.
#[derive(Debug)]
pub struct ResolvedRoute<'a> {
    pub chain: Vec<&'a Route>,
    pub params: HashMap<String, String>,
}

impl ResolvedRoute<'_> {
    /// A transition needs authentication when any matched ancestor says so.
    pub fn requires_auth(&self) -> bool {
        self.chain.iter().any(|route| route.meta.requires_auth)
    }

    /// Deepest role restriction on the chain, if any.
    pub fn required_role(&self) -> Option<UserRole> {
        self.chain.iter().rev().find_map(|route| route.meta.role)
    }

    /// Deepest declared title on the chain, if any.
    pub fn title(&self) -> Option<&'static str> {
        self.chain.iter().rev().find_map(|route| route.meta.title)
    }

    /// Redirect declared on the matched leaf, if any.
    pub fn redirect(&self) -> Option<&'static str> {
        self.chain.last().and_then(|route| route.redirect)
    }
}

/// Route tree with declaration-order matching.
#[derive(Debug, Clone)]
pub struct RouteTable {
    roots: Vec<Route>,
}

impl RouteTable {
    pub fn new(roots: Vec<Route>) -> Self {
        Self { roots }
    }

    /// Resolve a path against the tree. Returns the matched chain, or None
    /// when nothing (not even a wildcard) matches.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        Self::match_level(&self.roots, &segments)
    }

    fn match_level<'a>(routes: &'a [Route], segments: &[&str]) -> Option<ResolvedRoute<'a>> {
        routes
            .iter()
            .find_map(|route| Self::match_route(route, segments))
    }

    fn match_route<'a>(route: &'a Route, segments: &[&str]) -> Option<ResolvedRoute<'a>> {
        let mut params = HashMap::new();
        let mut index = 0;

        for pattern in route.segments() {
            if pattern == "*" {
                index = segments.len();
                break;
            }
            let segment = segments.get(index)?;
            if let Some(name) = pattern.strip_prefix(':') {
                params.insert(name.to_string(), (*segment).to_string());
            } else if pattern != *segment {
                return None;
            }
            index += 1;
        }

        let rest = &segments[index..];
        if rest.is_empty() {
            return Some(ResolvedRoute {
                chain: vec![route],
                params,
            });
        }

        let child = Self::match_level(&route.children, rest)?;
        let mut chain = vec![route];
        chain.extend(child.chain);
        params.extend(child.params);
        Some(ResolvedRoute { chain, params })
    }
}

/// Route table of the platform client: the public auth pages, the three
/// role-gated areas and the error pages.
///
/// Declaration order matters; the wildcard entry must stay last.
pub fn platform_routes() -> RouteTable {
    RouteTable::new(vec![
        Route::new("/").redirect_to("/login"),
        Route::new("/login").title("Sign In"),
        Route::new("/register").title("Sign Up"),
        Route::new("/student")
            .requires_auth()
            .role(UserRole::Student)
            .children(vec![
                Route::new("dashboard").title("Student Dashboard"),
                Route::new("courses").title("My Courses"),
                Route::new("courses/:course_id").title("Course Detail"),
                Route::new("ai-assistant").title("AI Learning Assistant"),
                Route::new("exams").title("My Exams"),
                Route::new("grades").title("My Grades"),
                Route::new("notifications").title("Notification Center"),
                Route::new("learning-path").title("Learning Path"),
                Route::new("knowledge-graph").title("Knowledge Graph"),
                Route::new("profile").title("Profile"),
            ]),
        Route::new("/teacher")
            .requires_auth()
            .role(UserRole::Teacher)
            .children(vec![
                Route::new("dashboard").title("Teacher Dashboard"),
                Route::new("courses").title("Course Management"),
                Route::new("courses/create").title("Create Course"),
                Route::new("courses/:course_id").title("Course Detail"),
                Route::new("knowledge").title("Knowledge Point Management"),
                Route::new("analytics").title("Teaching Analytics"),
                Route::new("exams").title("Exam Management"),
                Route::new("grades").title("Grade Management"),
                Route::new("notifications").title("Notification Center"),
                Route::new("profile").title("Profile"),
            ]),
        Route::new("/admin")
            .requires_auth()
            .role(UserRole::Admin)
            .children(vec![
                Route::new("dashboard").title("Admin Dashboard"),
                Route::new("users").title("User Management"),
                Route::new("courses").title("Course Management"),
                Route::new("analytics").title("Data Analytics"),
                Route::new("exams").title("Exam Management"),
                Route::new("grades").title("Grade Management"),
                Route::new("questions").title("Question Management"),
                Route::new("notifications").title("Notification Management"),
                Route::new("profile").title("Profile"),
            ]),
        Route::new("/403").title("Access Denied"),
        Route::new("/404").title("Page Not Found"),
        Route::new("*").redirect_to("/404"),
    ])
}
