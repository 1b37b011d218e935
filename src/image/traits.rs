/// Read-only row-major image access shared by the scanning stages.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Bounds-checked access with signed coordinates, as produced by the
    /// scan walks that may step one pixel past an image border.
    #[inline]
    fn pixel(&self, x: i32, y: i32) -> Option<Self::Pixel> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.row(y)[x])
    }
}
