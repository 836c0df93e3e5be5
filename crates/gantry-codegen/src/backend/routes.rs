use gantry_core::{Name, PlaceholderStyle, ReplacementMap};
use tracing::{error, info};

use crate::error::Result;
use crate::project::Project;
use crate::render::{read_file, write_file, Stubs};

const GROUP_OPEN: &str =
    "export const api = Router.group({ middleware: ['auth'] }, (router) => {";
const GROUP_CLOSE: &str = "});";

/// Register the entity's CRUD resource in the shared route file.
///
/// The file is rewritten from its parsed parts (import lines plus the route
/// lines inside the middleware group), so anything outside that recognized
/// shape does not survive a patch.
pub fn patch(project: &Project, stubs: &Stubs, module: &Name, entity: &Name) -> Result<()> {
    let path = project.routes_path();
    let table = entity.plural_snake_case();

    let mut map = ReplacementMap::new();
    map.insert("entityPascal", entity.upper_camel_case());
    map.insert("entitySnake", entity.snake_case());
    map.insert("moduleSnake", module.snake_case());
    map.insert("tableName", table.clone());

    if !path.exists() {
        let template = stubs.load("backend/routes.stub")?;
        return write_file(&path, &map.apply(&template, PlaceholderStyle::Braced));
    }

    let contents = read_file(&path)?;
    let resource_marker = format!("router.apiResource('{table}'");
    if contents.contains(&resource_marker) {
        info!(table = %table, "route already registered, skipping");
        return Ok(());
    }

    let Some(parsed) = RouteFile::parse(&contents) else {
        error!(path = %path.display(), "route group not found, leaving file unmodified");
        return Ok(());
    };

    let import = map.apply(
        "import { {{ entityPascal }}Controller } from '../modules/{{ moduleSnake }}/{{ entitySnake }}';",
        PlaceholderStyle::Braced,
    );
    let route = map.apply(
        "  router.apiResource('{{ tableName }}', {{ entityPascal }}Controller);",
        PlaceholderStyle::Braced,
    );

    write_file(&path, &parsed.with(import, route).render())
}

/// The two recognized sections of the route file.
struct RouteFile {
    imports: Vec<String>,
    routes: Vec<String>,
}

impl RouteFile {
    fn parse(contents: &str) -> Option<RouteFile> {
        let mut imports = Vec::new();
        let mut routes = Vec::new();
        let mut in_group = false;
        let mut saw_group = false;

        for line in contents.lines() {
            if line.trim_start().starts_with("import ") {
                imports.push(line.to_string());
            } else if line.trim() == GROUP_OPEN.trim() || line.contains("Router.group(") {
                in_group = true;
                saw_group = true;
            } else if in_group && line.trim() == GROUP_CLOSE {
                in_group = false;
            } else if in_group && !line.trim().is_empty() {
                routes.push(line.to_string());
            }
        }

        saw_group.then_some(RouteFile { imports, routes })
    }

    fn with(mut self, import: String, route: String) -> RouteFile {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for import in &self.imports {
            out.push_str(import);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(GROUP_OPEN);
        out.push('\n');
        for route in &self.routes {
            out.push_str(route);
            out.push('\n');
        }
        out.push_str(GROUP_CLOSE);
        out.push('\n');
        out
    }
}
