//! # webmark-package
//!
//! Turn a Markdown document that references remote images into a
//! self-contained bundle: the images are downloaded, renamed into a flat
//! `images/` folder and the Markdown is rewritten to point at them.
//!
//! Downloads are best effort. An image that cannot be fetched keeps its
//! original reference and is only reflected in
//! [`PackageBundle::success_count`] / [`PackageBundle::total_images`].
//!
//! ```no_run
//! use webmark_package::{base_name_from_title, create_zip, PackageOptions, Packager};
//!
//! # async fn run() -> Result<(), webmark_package::PackageError> {
//! let packager = Packager::http(PackageOptions::default())?;
//! let name = base_name_from_title("Release notes");
//! let bundle = packager
//!     .create_package("![chart](img/chart.png)", "https://example.com/notes/", &name)
//!     .await;
//! let zip = create_zip(&bundle, &name)?;
//! # let _ = zip;
//! # Ok(())
//! # }
//! ```

mod archive;
mod bundle;
mod error;
mod extract;
mod fetch;
mod naming;
mod resolve;

pub use archive::{create_zip, render_readme};
pub use bundle::{DownloadedImage, PackageBundle, PackageOptions, Packager};
pub use error::{FetchError, PackageError, Result};
pub use extract::{extract_image_refs, rewrite_image_refs, ImageRef};
pub use fetch::{HttpFetcher, ImageFetcher};
pub use naming::{base_name_from_title, image_filename, sanitize_filename, FilenameAllocator};
pub use resolve::resolve_url;
