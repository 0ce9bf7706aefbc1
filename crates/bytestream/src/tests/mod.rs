mod wrap;
