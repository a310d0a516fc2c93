//! Plain-text rendering of analysis results
//!
//! A successful analysis renders one banner-delimited section per category
//! the service returned, in a fixed order. A failure renders four lines.

use crate::models::{AnalysisFailure, AnalysisResult, BoundingBox, ImageAnalysis, Point};

const CLOSING_BANNER: &str = "----------------------------------------";

pub fn render(result: &AnalysisResult) -> String {
    match result {
        AnalysisResult::Success(analysis) => render_analysis(analysis),
        AnalysisResult::Failure(failure) => render_failure(failure),
    }
}

fn render_analysis(analysis: &ImageAnalysis) -> String {
    let mut report = Report::default();

    if let Some(caption) = &analysis.caption {
        report.section(
            "CAPTION",
            [format!(
                "\"{}\", Confidence {}",
                caption.text,
                confidence(caption.confidence)
            )],
        );
    }

    if let Some(captions) = &analysis.dense_captions {
        report.section(
            "DENSE CAPTIONS",
            captions.iter().map(|c| {
                format!(
                    "'{}', Confidence {}, Bounding box {}",
                    c.text,
                    confidence(c.confidence),
                    bounding_box(&c.bounding_box)
                )
            }),
        );
    }

    if let Some(lines) = &analysis.text {
        report.section(
            "TEXT",
            lines.iter().map(|l| {
                format!(
                    "'{}', Bounding polygon {}",
                    l.text,
                    polygon(&l.bounding_polygon)
                )
            }),
        );
    }

    if let Some(people) = &analysis.people {
        report.section(
            "PEOPLE",
            people.iter().map(|p| {
                format!(
                    "'Confidence {}, Bounding box {}",
                    confidence(p.confidence),
                    bounding_box(&p.bounding_box)
                )
            }),
        );
    }

    if let Some(objects) = &analysis.objects {
        report.section(
            "OBJECTS",
            objects.iter().map(|o| {
                format!(
                    "'{}', 'Confidence {}, Bounding box {}",
                    o.name,
                    confidence(o.confidence),
                    bounding_box(&o.bounding_box)
                )
            }),
        );
    }

    if let Some(tags) = &analysis.tags {
        report.section(
            "TAGS",
            tags.iter()
                .map(|t| format!("'{}', 'Confidence {}", t.name, confidence(t.confidence))),
        );
    }

    report.text
}

fn render_failure(failure: &AnalysisFailure) -> String {
    format!(
        "Analysis failed.\n Error reason: {}\n Error code: {}\n Error message: {}\n",
        failure.reason, failure.error_code, failure.message
    )
}

#[derive(Default)]
struct Report {
    text: String,
}

impl Report {
    /// Empty categories produce no section at all.
    fn section(&mut self, title: &str, lines: impl IntoIterator<Item = String>) {
        let mut lines = lines.into_iter().peekable();
        if lines.peek().is_none() {
            return;
        }

        self.text
            .push_str(&format!("----------- {} --------------\n", title));
        for line in lines {
            self.text.push_str(&line);
            self.text.push('\n');
        }
        self.text.push_str(CLOSING_BANNER);
        self.text.push('\n');
    }
}

fn confidence(value: f64) -> String {
    format!("{:.4}", value)
}

fn bounding_box(bbox: &BoundingBox) -> String {
    format!("{{{}}}", bbox)
}

fn polygon(points: &[Point]) -> String {
    let joined = points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", joined)
}
