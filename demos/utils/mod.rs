use fortune_rs::{Diagram, Float, Point};

#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `x y`")]
    Malformed { line: usize },
    #[error("line {line}: bad number")]
    Number {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Load sites from a plain file, one `x y` pair per line. Blank lines are skipped.
pub fn load_sites(path: &std::path::Path) -> Result<Vec<Point>, LoaderError> {
    let content = std::fs::read_to_string(path)?;

    let mut sites = vec![];
    for (idx, line) in content.lines().enumerate() {
        if let Some(site) = parse_site(idx + 1, line)? {
            sites.push(site);
        }
    }
    Ok(sites)
}

fn parse_site(line: usize, content: &str) -> Result<Option<Point>, LoaderError> {
    let mut iter = content.split_whitespace();
    let Some(x) = iter.next() else {
        return Ok(None);
    };
    let y = iter.next().ok_or(LoaderError::Malformed { line })?;

    let parse = |value: &str| {
        value
            .parse::<Float>()
            .map_err(|source| LoaderError::Number { line, source })
    };
    Ok(Some(Point::new(parse(x)?, parse(y)?)))
}

/// Draw sites, edges and the cell of an optional query point, clipped to the diagram bounds
pub fn draw_svg(diagram: &Diagram, query: Option<Point>, path: std::path::PathBuf) {
    use svg::Document;
    use svg::Node;

    let bounds = diagram.bounds();
    // svg's y axis points down
    let flip = |p: Point| (p.x, bounds.max.y + bounds.min.y - p.y);
    let r = bounds.width().max(bounds.height()) / 300.;

    let mut doc = Document::new()
        .set(
            "viewBox",
            (bounds.min.x, bounds.min.y, bounds.width(), bounds.height()),
        )
        .set("style", "background-color: #F5F5F5");

    if let Some(cell) = query.and_then(|q| diagram.cell_containing(q)) {
        for &edge in cell.edges() {
            let edge = &diagram.edges()[edge];
            let data = svg::node::element::path::Data::new()
                .move_to(flip(cell.point()))
                .line_to(flip(edge.start))
                .line_to(flip(edge.end))
                .close();
            doc.append(
                svg::node::element::Path::new()
                    .set("d", data)
                    .set("stroke", "none")
                    .set("fill", "#FFA726"),
            );
        }
    }

    for edge in diagram.edges() {
        let (x1, y1) = flip(edge.start);
        let (x2, y2) = flip(edge.end);
        doc.append(
            svg::node::element::Line::new()
                .set("stroke", "#3E2723")
                .set("stroke-width", r / 2.)
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2),
        );
    }

    for site in diagram.sites() {
        let (cx, cy) = flip(*site);
        doc.append(
            svg::node::element::Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", r)
                .set("fill", "#29B6F6"),
        );
    }

    if let Some(query) = query {
        let (cx, cy) = flip(query);
        doc.append(
            svg::node::element::Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", r)
                .set("fill", "#EF5350"),
        );
    }

    if let Err(err) = svg::save(path, &doc) {
        eprintln!("failed to save svg: {err}");
    }
}
