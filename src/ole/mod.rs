/// OfficeArt drawing-object records
///
/// The container/atom tree Office binary formats use for shapes, groups and
/// embedded images, with its encoder and decoder.
pub mod escher;

/// Legacy Excel (.xls) record stream writing
pub mod xls;
