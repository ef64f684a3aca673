use log::{debug, error};
use std::path::{Path, PathBuf};

use super::{container_path, default_output_path};
use crate::analysis::{self, RECORD_FORMAT, RECORD_VERSION};
use crate::{CodecOptions, Media, MeowError, MetadataRecord, Persist, Result};

pub fn prepare() -> EncodeApi {
    EncodeApi::default()
}

#[derive(Default, Debug)]
pub struct EncodeApi {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    annotations: Option<MetadataRecord>,
    annotations_file: Option<PathBuf>,
    metadata: Option<MetadataRecord>,
    hints_from_file_name: bool,
    skip_analysis: bool,
    options: CodecOptions,
}

impl EncodeApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// the carrier image, png or jpeg
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the container is written to, always as PNG.
    /// Without it the container lands next to the image with the `.meow` extension.
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn use_output<A: AsRef<Path>>(mut self, output: Option<A>) -> Self {
        self.output = output.map(|o| o.as_ref().to_path_buf());
        self
    }

    /// annotations that end up under `ai_annotations`
    pub fn with_annotations(mut self, annotations: MetadataRecord) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// a JSON file with annotations, read when the job is executed
    pub fn use_annotations_file<A: AsRef<Path>>(mut self, file: Option<A>) -> Self {
        self.annotations_file = file.map(|f| f.as_ref().to_path_buf());
        self
    }

    /// embeds exactly this record, no analysis and no annotations are added
    pub fn with_metadata(mut self, metadata: MetadataRecord) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// guess object classes and preprocessing parameters from the image file name
    pub fn with_hints_from_file_name(mut self) -> Self {
        self.hints_from_file_name = true;
        self
    }

    pub fn use_hints_from_file_name(mut self, enabled: bool) -> Self {
        self.hints_from_file_name = enabled;
        self
    }

    /// leaves out the image features and attention maps
    pub fn without_analysis(mut self) -> Self {
        self.skip_analysis = true;
        self
    }

    pub fn use_analysis(mut self, enabled: bool) -> Self {
        self.skip_analysis = !enabled;
        self
    }

    /// writes the container and returns where it went
    pub fn execute(self) -> Result<PathBuf> {
        self.options.validate()?;
        let Some(image) = self.image.as_deref() else {
            return Err(MeowError::CarrierNotSet);
        };
        let output = match self.output.as_deref() {
            Some(output) => container_path(output),
            None => default_output_path(image),
        };

        let mut media = Media::from_file(image)?;
        let record = match &self.metadata {
            Some(metadata) => metadata.clone(),
            None => self.build_record(image, &media)?,
        };
        debug!("embedding {} top level entries into {image:?}", record.len());

        media.hide_record(&record, &self.options)?.save_as(&output)?;

        Ok(output)
    }

    fn build_record(&self, image: &Path, media: &Media) -> Result<MetadataRecord> {
        let mut annotations = if self.hints_from_file_name {
            analysis::annotations_from_file_name(image)
        } else {
            MetadataRecord::new()
        };
        if let Some(file) = self.annotations_file.as_deref() {
            annotations = annotations.merge(read_annotations(file)?);
        }
        if let Some(given) = &self.annotations {
            annotations = annotations.merge(given.clone());
        }

        if self.skip_analysis {
            return Ok(MetadataRecord::new()
                .with("version", RECORD_VERSION)
                .with("format", RECORD_FORMAT)
                .with("ai_annotations", annotations.into_value()));
        }

        Ok(analysis::build_metadata_record(
            media.image(),
            Some(annotations),
        ))
    }
}

fn read_annotations(file: &Path) -> Result<MetadataRecord> {
    let json = std::fs::read_to_string(file).map_err(|source| {
        error!("Error reading annotations {file:?}: {source}");
        MeowError::ReadError { source }
    })?;

    MetadataRecord::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_noise_image;
    use image::RgbaImage;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn carrier(dir: &TempDir, name: &str, image: RgbaImage) -> PathBuf {
        let path = dir.path().join(name);
        image.save(&path).unwrap();
        path
    }

    fn unveil(container: &Path) -> MetadataRecord {
        Media::from_file(container)
            .unwrap()
            .unveil_record(&CodecOptions::default())
            .unwrap()
    }

    #[test]
    fn illustrate_api_usage() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let image = carrier(&dir, "puppy.png", prepare_noise_image(64, 48, 1));

        let output = prepare()
            .with_image(&image)
            .with_hints_from_file_name()
            .with_annotations(MetadataRecord::new().with("photographer", "unknown"))
            .execute()
            .expect("Failed to create the container");

        assert_eq!(output, dir.path().join("puppy.meow"));
        let record = unveil(&output);
        assert_eq!(record.get("format"), Some(&json!(RECORD_FORMAT)));
        assert!(record.get("features").is_some());
        let annotations = record.get("ai_annotations").unwrap();
        assert_eq!(annotations["photographer"], json!("unknown"));
        assert_eq!(
            annotations["object_classes"],
            json!(["background", "dog", "animal"])
        );
    }

    #[test]
    fn should_embed_only_annotations_without_analysis() {
        let dir = tempdir().unwrap();
        let image = carrier(&dir, "plain.png", RgbaImage::new(32, 32));
        let annotations = dir.path().join("annotations.json");
        std::fs::write(&annotations, r#"{ "object_classes": ["cat"] }"#).unwrap();

        let output = prepare()
            .with_image(&image)
            .with_output(dir.path().join("out"))
            .use_annotations_file(Some(&annotations))
            .without_analysis()
            .execute()
            .unwrap();

        assert_eq!(output, dir.path().join("out.meow"));
        assert_eq!(
            unveil(&output).into_value(),
            json!({
                "version": RECORD_VERSION,
                "format": RECORD_FORMAT,
                "ai_annotations": { "object_classes": ["cat"] },
            })
        );
    }

    #[test]
    fn should_embed_a_given_record_as_is() {
        let dir = tempdir().unwrap();
        let image = carrier(&dir, "plain.png", RgbaImage::new(16, 16));
        let record = MetadataRecord::new().with("version", 2);

        let output = prepare()
            .with_image(&image)
            .with_metadata(record.clone())
            .execute()
            .unwrap();

        assert_eq!(unveil(&output), record);
    }

    #[test]
    fn should_not_write_anything_when_the_record_does_not_fit() {
        let dir = tempdir().unwrap();
        let image = carrier(&dir, "tiny.png", prepare_noise_image(10, 10, 7));
        let output = dir.path().join("tiny.meow");

        let result = prepare()
            .with_image(&image)
            .with_output(&output)
            .execute();

        assert!(matches!(result, Err(MeowError::PayloadTooLarge { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn should_require_a_carrier() {
        assert!(matches!(
            prepare().execute(),
            Err(MeowError::CarrierNotSet)
        ));
    }

    #[test]
    fn should_reject_broken_annotation_files() {
        let dir = tempdir().unwrap();
        let image = carrier(&dir, "plain.png", RgbaImage::new(32, 32));
        let annotations = dir.path().join("annotations.json");
        std::fs::write(&annotations, "[1, 2, 3]").unwrap();

        assert!(matches!(
            prepare()
                .with_image(&image)
                .use_annotations_file(Some(&annotations))
                .execute(),
            Err(MeowError::InvalidMetadata(_))
        ));
    }
}
