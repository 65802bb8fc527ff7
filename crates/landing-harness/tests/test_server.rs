// Test Server - Local HTTP server for integration tests
//
// Serves the landing page fixture at `/` plus small pages that exercise
// fallback resolution. Everything is compiled in, so tests run offline.

// Functions appear "unused" because each test binary compiles separately.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode, header},
    routing::get,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

const LANDING_PAGE: &str = include_str!("../fixtures/landing.html");

/// Test server handle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the test server on a random available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(landing_page))
            .route("/fallback.html", get(fallback_page))
            .route("/delayed.html", get(delayed_page));

        // Bind to port 0 to get any available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");

        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the test server
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

fn html(body: &'static str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(body))
        .unwrap()
}

async fn landing_page() -> Response<Body> {
    html(LANDING_PAGE)
}

// Carousel controls without the component class names: the next control is
// only recognisable by its chevron icon, the previous one by its label.
async fn fallback_page() -> Response<Body> {
    html(
        r#"<!doctype html>
<html>
<head><title>Fallback controls</title></head>
<body>
  <section id="testimonials">
    <div class="carousel-content" style="transform: translate3d(0px, 0px, 0px);">
      <div class="carousel-item">One</div>
      <div class="carousel-item">Two</div>
    </div>
    <button type="button" class="nav-back" aria-label="Previous testimonial">&larr;</button>
    <button type="button" class="nav-forward">
      <svg class="lucide lucide-chevron-right" width="16" height="16" viewBox="0 0 24 24"><path d="m9 18 6-6-6-6" stroke="black"/></svg>
    </button>
  </section>
  <script>
    var slide = 0;
    var track = document.querySelector('.carousel-content');
    function move(step) {
      slide = (slide + step + 2) % 2;
      track.style.transform = 'translate3d(' + (-100 * slide) + 'px, 0px, 0px)';
    }
    document.querySelector('.nav-forward').addEventListener('click', function () { move(1); });
    document.querySelector('.nav-back').addEventListener('click', function () { move(-1); });
  </script>
</body>
</html>"#,
    )
}

// A hidden decoy for the first candidate, and a real control that only
// appears after a short delay.
async fn delayed_page() -> Response<Body> {
    html(
        r#"<!doctype html>
<html>
<head><title>Delayed controls</title></head>
<body>
  <section id="testimonials">
    <button type="button" class="carousel-next" style="display: none">Hidden next</button>
    <div id="slot"></div>
  </section>
  <script>
    setTimeout(function () {
      var button = document.createElement('button');
      button.type = 'button';
      button.setAttribute('aria-label', 'Next testimonial');
      button.textContent = 'Forward';
      document.getElementById('slot').appendChild(button);
    }, 400);
  </script>
</body>
</html>"#,
    )
}
