mod compositor;
mod patterns;
