use stead::error::SiteError;
use stead::render::Renderer;
use tempfile::TempDir;

fn templates_fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).expect("Failed to write fixture");
    }
    dir
}

mod rendering {
    use super::*;

    #[test]
    fn substitutes_the_css_context_value() {
        let dir = templates_fixture(&[(
            "index.html",
            "<html><style>{{ css }}</style><p>home</p></html>",
        )]);
        let renderer = Renderer::load(dir.path(), "a{color:red}").expect("Failed to load");

        let html = renderer.render("index.html").expect("Failed to render");
        assert_eq!(html, "<html><style>a{color:red}</style><p>home</p></html>");
    }

    #[test]
    fn is_pure_across_repeated_calls() {
        let dir = templates_fixture(&[("cv.html", "<style>{{ css }}</style><h1>CV</h1>")]);
        let renderer = Renderer::load(dir.path(), "x{margin:0}").expect("Failed to load");

        let first = renderer.render("cv.html").expect("Failed to render");
        let second = renderer.render("cv.html").expect("Failed to render");
        assert_eq!(first, second);
    }

    #[test]
    fn renders_posts_with_the_post_body_in_context() {
        let dir = templates_fixture(&[(
            "blog_post.html",
            "<style>{{ css }}</style><main>{{ post | safe }}</main>",
        )]);
        let renderer = Renderer::load(dir.path(), "").expect("Failed to load");

        let html = renderer
            .render_post("blog_post.html", "<h1>Hello</h1>")
            .expect("Failed to render");
        assert_eq!(html, "<style></style><main><h1>Hello</h1></main>");
    }
}

mod failures {
    use super::*;

    #[test]
    fn unknown_template_name_is_an_error() {
        let dir = templates_fixture(&[("index.html", "<p>home</p>")]);
        let renderer = Renderer::load(dir.path(), "").expect("Failed to load");

        let err = renderer
            .render("nonexistent.html")
            .expect_err("Expected rendering to fail");
        assert!(matches!(err, SiteError::TemplateNotFound { .. }));
    }

    #[test]
    fn unsupplied_context_key_is_an_error() {
        let dir = templates_fixture(&[("index.html", "<p>{{ subtitle }}</p>")]);
        let renderer = Renderer::load(dir.path(), "").expect("Failed to load");

        let err = renderer
            .render("index.html")
            .expect_err("Expected rendering to fail");
        assert!(matches!(err, SiteError::MissingContext { .. }));
    }
}
