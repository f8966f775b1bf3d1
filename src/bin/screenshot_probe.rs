//! Screenshot Service Tester
//!
//! Probes the free screenshot services the dashboard could use for preview
//! thumbnails and recommends the first one that answers with a real image.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::time::sleep;

use check_pages::report;

const TEST_URL: &str = "https://bathroom.wolfcarpenters.com";
const PROBE_TIMEOUT_SECS: u64 = 15;

struct Service {
    name: &'static str,
    description: &'static str,
    url: String,
}

fn services() -> Vec<Service> {
    let encoded: String = url::form_urlencoded::byte_serialize(TEST_URL.as_bytes()).collect();
    vec![
        Service {
            name: "Screenshot Machine (Demo)",
            description: "Free with the demo key, watermarked",
            url: format!(
                "https://api.screenshotmachine.com/?key=demo&url={}&dimension=1200x800",
                encoded
            ),
        },
        Service {
            name: "Screenshot.rocks",
            description: "Fully free, no watermark",
            url: format!(
                "https://screenshot.rocks/api/screenshot?url={}&width=1200&height=800",
                encoded
            ),
        },
        Service {
            name: "Microlink",
            description: "Free tier, 50 requests/day",
            url: format!(
                "https://api.microlink.io/?url={}&screenshot=true&meta=false&embed=screenshot.url",
                encoded
            ),
        },
        Service {
            name: "ApiFlash (Demo)",
            description: "Free with the demo key",
            url: format!(
                "https://api.apiflash.com/v1/urltoimage?access_key=demo&url={}&width=1200&height=800",
                encoded
            ),
        },
        Service {
            name: "URLBox.io (Trial)",
            description: "Free on the trial plan",
            url: format!(
                "https://api.urlbox.io/v1/demo/png?url={}&width=1200&height=800",
                encoded
            ),
        },
        Service {
            name: "PagePeeker",
            description: "Free, limited sizes",
            url: format!("https://api.pagepeeker.com/v2/thumbs.php?size=l&url={}", encoded),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    report::banner("🔍 SCREENSHOT SERVICE TESTER");
    println!();
    println!("🎯 Test URL: {}", TEST_URL);

    let client = Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")?;

    tokio::select! {
        result = run(&client) => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("⚠️  Test interrupted");
            Ok(())
        }
    }
}

async fn run(client: &Client) -> Result<()> {
    let mut working = Vec::new();

    for service in services() {
        if test_service(client, &service).await {
            working.push(service);
        }
        sleep(Duration::from_secs(1)).await;
    }

    println!();
    report::banner("📊 RESULTS");
    println!();

    if working.is_empty() {
        println!("❌ NO SERVICE WORKED!");
        println!();
        println!("💡 ALTERNATIVE:");
        println!("   Use colored placeholders or local captures");
        return Ok(());
    }

    println!("✅ WORKING SERVICES:\n");
    for service in &working {
        println!("   • {}", service.name);
        println!("     {}\n", service.description);
    }

    let best = &working[0];
    println!("💡 RECOMMENDATION: {}", best.name);
    println!();
    println!("🔧 DASHBOARD SNIPPET:\n");
    println!("function getScreenshotUrl(url) {{");
    println!("    const finalUrl = getPublicUrl(url);");
    println!("    return `{}`;", snippet_template(best.name));
    println!("}}");

    Ok(())
}

/// One probe per service: a 200 with an image Content-Type is a pass, JSON
/// may still carry the image URL, anything else is a fail.
async fn test_service(client: &Client, service: &Service) -> bool {
    println!();
    println!("🧪 Testing: {}", service.name);
    println!("   📝 {}", service.description);
    println!("   🔗 {}...", report::shorten(&service.url, 100));

    let response = match client.get(&service.url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            println!("   ⏱️  TIMEOUT (too slow)");
            return false;
        }
        Err(e) => {
            println!("   ❌ Error: {}", report::shorten(&e.to_string(), 100));
            return false;
        }
    };

    let status = response.status().as_u16();
    if status != 200 {
        println!("   ❌ Error {}", status);
        return false;
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.contains("image") {
        match response.bytes().await {
            Ok(body) => {
                println!("   ✅ WORKING!");
                println!("   📊 Size: {:.1} KB", body.len() as f64 / 1024.0);
                println!("   🖼️  Type: {}", content_type);
                true
            }
            Err(_) => {
                println!("   ⚠️  Could not read the response body");
                false
            }
        }
    } else if content_type.contains("json") {
        let text = response.text().await.unwrap_or_default();
        println!("   ⚠️  Returned JSON (may carry the image URL)");
        println!("   📄 {}", report::shorten(&text, 200));
        true
    } else {
        println!("   ⚠️  Response is not an image: {}", content_type);
        false
    }
}

fn snippet_template(service_name: &str) -> String {
    let template = if service_name.contains("Screenshot Machine") {
        "https://api.screenshotmachine.com/?key=demo&url=${encodeURIComponent(finalUrl)}&dimension=1200x800"
    } else if service_name.contains("Screenshot.rocks") {
        "https://screenshot.rocks/api/screenshot?url=${encodeURIComponent(finalUrl)}&width=1200&height=800"
    } else if service_name.contains("Microlink") {
        "https://api.microlink.io/?url=${encodeURIComponent(finalUrl)}&screenshot=true&meta=false&embed=screenshot.url"
    } else {
        "${finalUrl}"
    };
    template.to_string()
}
