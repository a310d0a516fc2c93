//! Image Analysis 4.0 response payloads and their conversion into models.

use crate::models::{
    BoundingBox, Caption, DenseCaption, DetectedObject, DetectedPerson, ImageAnalysis, Point, Tag,
    TextLine,
};
use serde::Deserialize;

/// Top-level `imageanalysis:analyze` response. Blocks for features that
/// were not requested or not produced are absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub model_version: Option<String>,
    pub caption_result: Option<CaptionResult>,
    pub dense_captions_result: Option<ValuesResult<DenseCaptionItem>>,
    pub read_result: Option<ReadResult>,
    pub people_result: Option<ValuesResult<PersonItem>>,
    pub objects_result: Option<ValuesResult<ObjectItem>>,
    pub tags_result: Option<ValuesResult<TagItem>>,
}

#[derive(Debug, Deserialize)]
pub struct ValuesResult<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct CaptionResult {
    pub text: String,
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenseCaptionItem {
    pub text: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub blocks: Vec<ReadBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ReadBlock {
    #[serde(default)]
    pub lines: Vec<ReadLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadLine {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<Point>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonItem {
    pub bounding_box: BoundingBox,
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectItem {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub tags: Vec<TagItem>,
}

#[derive(Debug, Deserialize)]
pub struct TagItem {
    pub name: String,
    pub confidence: f64,
}

/// `{"error": {"code": ..., "message": ...}}` body of a rejected request.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl From<AnalyzeResponse> for ImageAnalysis {
    fn from(response: AnalyzeResponse) -> Self {
        ImageAnalysis {
            caption: response.caption_result.map(|c| Caption {
                text: c.text,
                confidence: c.confidence,
            }),
            dense_captions: response.dense_captions_result.map(|r| {
                r.values
                    .into_iter()
                    .map(|d| DenseCaption {
                        text: d.text,
                        confidence: d.confidence,
                        bounding_box: d.bounding_box,
                    })
                    .collect()
            }),
            text: response.read_result.map(|r| {
                r.blocks
                    .into_iter()
                    .flat_map(|block| block.lines)
                    .map(|line| TextLine {
                        text: line.text,
                        bounding_polygon: line.bounding_polygon,
                    })
                    .collect()
            }),
            people: response.people_result.map(|r| {
                r.values
                    .into_iter()
                    .map(|p| DetectedPerson {
                        confidence: p.confidence,
                        bounding_box: p.bounding_box,
                    })
                    .collect()
            }),
            // The first tag of a detected object is its name.
            objects: response.objects_result.map(|r| {
                r.values
                    .into_iter()
                    .map(|o| {
                        let (name, confidence) = o
                            .tags
                            .into_iter()
                            .next()
                            .map(|t| (t.name, t.confidence))
                            .unwrap_or_default();
                        DetectedObject {
                            name,
                            confidence,
                            bounding_box: o.bounding_box,
                        }
                    })
                    .collect()
            }),
            tags: response.tags_result.map(|r| {
                r.values
                    .into_iter()
                    .map(|t| Tag {
                        name: t.name,
                        confidence: t.confidence,
                    })
                    .collect()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_conversion() {
        let json = serde_json::json!({
            "modelVersion": "2023-10-01",
            "captionResult": { "text": "a cat on a sofa", "confidence": 0.81 },
            "denseCaptionsResult": { "values": [
                { "text": "a cat", "confidence": 0.7, "boundingBox": { "x": 1, "y": 2, "w": 3, "h": 4 } }
            ]},
            "readResult": { "blocks": [
                { "lines": [
                    { "text": "HELLO", "boundingPolygon": [ { "x": 0, "y": 0 }, { "x": 5, "y": 0 } ], "words": [] }
                ]},
                { "lines": [
                    { "text": "WORLD", "boundingPolygon": [] }
                ]}
            ]},
            "peopleResult": { "values": [
                { "boundingBox": { "x": 0, "y": 0, "w": 9, "h": 9 }, "confidence": 0.5 }
            ]},
            "objectsResult": { "values": [
                { "boundingBox": { "x": 4, "y": 4, "w": 2, "h": 2 }, "tags": [ { "name": "cat", "confidence": 0.66 } ] }
            ]},
            "tagsResult": { "values": [ { "name": "indoor", "confidence": 0.99 } ] },
            "metadata": { "width": 100, "height": 100 }
        });

        let response: AnalyzeResponse = serde_json::from_value(json).unwrap();
        let analysis = ImageAnalysis::from(response);

        assert_eq!(analysis.caption.unwrap().text, "a cat on a sofa");
        assert_eq!(analysis.dense_captions.unwrap()[0].bounding_box.height, 4);
        let lines = analysis.text.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].bounding_polygon[1], Point { x: 5, y: 0 });
        assert_eq!(lines[1].text, "WORLD");
        assert_eq!(analysis.people.unwrap().len(), 1);
        let objects = analysis.objects.unwrap();
        assert_eq!(objects[0].name, "cat");
        assert_eq!(objects[0].confidence, 0.66);
        assert_eq!(analysis.tags.unwrap()[0].name, "indoor");
    }

    #[test]
    fn test_missing_blocks_are_none() {
        let json = serde_json::json!({
            "modelVersion": "2023-10-01",
            "captionResult": { "text": "a dog", "confidence": 0.5 }
        });

        let analysis = ImageAnalysis::from(serde_json::from_value::<AnalyzeResponse>(json).unwrap());

        assert!(analysis.caption.is_some());
        assert!(analysis.dense_captions.is_none());
        assert!(analysis.text.is_none());
        assert!(analysis.people.is_none());
        assert!(analysis.objects.is_none());
        assert!(analysis.tags.is_none());
    }

    #[test]
    fn test_untagged_object_has_empty_name() {
        let json = serde_json::json!({
            "objectsResult": { "values": [ { "boundingBox": { "x": 0, "y": 0, "w": 1, "h": 1 } } ] }
        });

        let analysis = ImageAnalysis::from(serde_json::from_value::<AnalyzeResponse>(json).unwrap());
        let objects = analysis.objects.unwrap();

        assert_eq!(objects[0].name, "");
        assert_eq!(objects[0].confidence, 0.0);
    }
}
