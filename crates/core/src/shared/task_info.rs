use std::fmt;

use crate::shared::constants::TASK_NAME;

/// Descriptive metadata a host shows for the landmark task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: &'static str,
    pub short_description: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub icon_path: &'static str,
    pub keywords: &'static str,
    pub authors: &'static str,
    pub article: &'static str,
    pub journal: &'static str,
    pub year: u16,
    pub doc_link: &'static str,
    pub license: &'static str,
    pub version: &'static str,
}

pub const FACEMARK_TASK_INFO: TaskInfo = TaskInfo {
    name: TASK_NAME,
    short_description: "Facial landmark detection using Local Binary Features (LBF)",
    description: "The locations of the fiducial facial landmark points around facial components \
                  and facial contour capture the rigid and non-rigid facial deformations due to \
                  head movements and facial expressions. They are hence important for various \
                  facial analysis tasks.",
    path: "Plugins/Rust/Face/Landmarks",
    icon_path: "Icon/icon.png",
    keywords: "face,facial,landmark",
    authors: "Ren S, Cao X, Wei Y, Sun J.",
    article: "Face alignment at 3000 fps via regressing local binary features",
    journal: "CVPR",
    year: 2014,
    doc_link: "https://docs.opencv.org/3.4.3/dc/d63/classcv_1_1face_1_1FacemarkLBF.html",
    license: "MIT",
    version: "1.0.0",
};

impl TaskInfo {
    pub fn keyword_list(&self) -> Vec<&'static str> {
        self.keywords.split(',').filter(|k| !k.is_empty()).collect()
    }
}

impl fmt::Display for TaskInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} v{}", self.name, self.version)?;
        writeln!(f, "  {}", self.short_description)?;
        writeln!(f, "  path:     {}", self.path)?;
        writeln!(f, "  keywords: {}", self.keyword_list().join(", "))?;
        writeln!(
            f,
            "  article:  {} ({}, {}) by {}",
            self.article, self.journal, self.year, self.authors
        )?;
        writeln!(f, "  docs:     {}", self.doc_link)?;
        write!(f, "  license:  {}", self.license)
    }
}
